//! Console plus append-only file logging.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Open `path` for appending, creating it and its directory if needed.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Plain-text layer writing to an already opened log file.
pub fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
}

/// Filter read from the environment variable `var`, `info` when unset or invalid.
pub fn env_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`),
/// console output, and the log file at `log_file`.
pub fn init(log_file: &Path) -> Result<()> {
    let file = open_log_file(log_file)?;

    tracing_subscriber::registry()
        .with(env_filter(EnvFilter::DEFAULT_ENV))
        .with(fmt::layer())
        .with(file_layer(file))
        .try_init()
        .context("Failed to install tracing subscriber")
}
