//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Review a batch of generated responses and mark each one accepted or rejected.
#[derive(Debug, Parser)]
#[command(name = "verdict", version)]
pub struct Cli {
    /// JSON file holding the batch to review: an array of objects with
    /// `filePath`, `response`, optional `usage` and optional `status`.
    pub input: Option<PathBuf>,

    /// Where the reviewed batch is written. Overrides `export_file` from the config.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Color theme: `dark` or `catppuccin-mocha`.
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Render responses as plain text instead of highlighted markdown.
    #[arg(long)]
    pub no_highlight: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(output) = &self.output {
            config.export_file = output.clone();
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if self.no_highlight {
            config.highlight = false;
        }
        config
    }
}
