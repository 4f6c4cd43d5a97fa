//! File logging.
//!
//! The TUI owns the terminal, so `tracing` output goes to
//! `$XDG_STATE_HOME/verdict/verdict.log` (or `~/.local/state/verdict/verdict.log`)
//! through a non-blocking writer. `RUST_LOG` takes precedence over the
//! configured filter.

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Directory holding `verdict.log`.
pub fn log_dir() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".local").join("state"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verdict")
}

/// Installs the global subscriber.
///
/// The returned guard flushes buffered log lines when dropped; keep it alive
/// until the program exits.
///
/// # Errors
///
/// Returns `Err` if the log directory or file cannot be created.
pub fn init(default_filter: &str) -> std::io::Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(dir.join("verdict.log"))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_ansi(false)
        .with_filter(filter);

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
    Ok(guard)
}
