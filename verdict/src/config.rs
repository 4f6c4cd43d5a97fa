//! User configuration for verdict.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/verdict/config.toml` (falling back
//! to `~/.config/verdict/config.toml`). Every key is optional:
//!
//! ```toml
//! theme = "catppuccin-mocha"
//! export_file = "reviewed.json"
//! log_filter = "verdict=debug,verdict_core=debug"
//! highlight = true
//! ```
//!
//! Command-line flags override the file.

use std::path::PathBuf;

use serde::Deserialize;

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in theme name: `dark` or `catppuccin-mocha`.
    pub theme: String,
    /// Path the `e` key writes the reviewed batch to.
    pub export_file: PathBuf,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Syntax-highlight responses as markdown. Off renders them as plain text.
    pub highlight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            export_file: PathBuf::from(verdict_core::codec::DEFAULT_EXPORT_FILE),
            log_filter: "verdict=info,verdict_core=info".to_owned(),
            highlight: true,
        }
    }
}

/// Returns the path to the verdict config file.
///
/// Prefers `$XDG_CONFIG_HOME/verdict/config.toml`; falls back to
/// `~/.config/verdict/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("verdict").join("config.toml")
}

/// Parses the contents of a config file.
///
/// # Errors
///
/// Returns the `toml` error when the text is not valid TOML or a key has the
/// wrong type.
pub fn parse_config(raw: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(raw)
}

/// Loads the config file, falling back to defaults.
///
/// A missing file is silent. A malformed file is reported on stderr (logging
/// is not up yet at this point) and then ignored, so a config typo never
/// prevents startup.
pub fn load_config() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match parse_config(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("verdict: config parse error in {}: {}", path.display(), e);
            Config::default()
        }
    }
}
