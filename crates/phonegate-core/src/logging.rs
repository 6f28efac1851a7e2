//! Tracing setup.
//!
//! The TUI owns stdout/stderr while running, so logs go to
//! `<home>/logs/phonegate.log` through a non-blocking file writer.
//! The filter comes from `PHONEGATE_LOG`, falling back to `log_filter` in config.

use std::fs;

use anyhow::{Context, Result};
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, paths};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "PHONEGATE_LOG";

const LOG_FILE_NAME: &str = "phonegate.log";

/// Installs the global tracing subscriber.
///
/// The returned guard flushes buffered log lines on drop and must be held
/// for the lifetime of the process.
///
/// # Errors
/// Returns an error if the log directory cannot be created or the
/// configured filter is invalid.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let filter = build_filter(config)?;

    let dir = paths::logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();

    Ok(guard)
}

fn build_filter(config: &Config) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive.trim())
            .with_context(|| format!("Invalid {LOG_ENV_VAR} filter")),
        _ => EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("Invalid log_filter '{}'", config.log_filter)),
    }
}
