//! Tracing subscriber setup.
//!
//! Two sinks:
//! - daily-rotated files under `logging.dir`, used whenever a directory is
//!   configured
//! - stderr, used only when the caller allows it (the live view owns the
//!   terminal and never logs to it)
//!
//! `RUST_LOG` overrides the configured level.

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;
use crate::error::{SimError, SimResult};

/// Where log events may go when no log directory is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Write to stderr.
    Stderr,
    /// Drop events.
    Silent,
}

/// Build the level filter, honouring `RUST_LOG` first.
///
/// # Errors
///
/// Returns [`SimError::Logging`] if `level` is not a valid filter directive.
pub fn build_filter(level: &str, verbose: bool) -> SimResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = if verbose { "debug" } else { level };
    EnvFilter::try_new(level).map_err(|e| SimError::logging(format!("bad level '{level}': {e}")))
}

/// Install the global subscriber.
///
/// Returns the file writer guard when file logging is active; it must be
/// held until exit so buffered lines are flushed.
///
/// # Errors
///
/// Returns error if the log directory cannot be created, the level is
/// invalid, or a subscriber is already installed.
pub fn init(
    config: &LogConfig,
    verbose: bool,
    fallback: Fallback,
) -> SimResult<Option<WorkerGuard>> {
    let filter = build_filter(&config.level, verbose)?;

    if let Some(dir) = &config.dir {
        fs::create_dir_all(dir)?;
        let appender = rolling::daily(dir, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true),
            )
            .try_init()
            .map_err(|e| SimError::logging(e.to_string()))?;

        tracing::debug!(dir = %dir.display(), prefix = %config.file_prefix, "file logging initialized");
        return Ok(Some(guard));
    }

    match fallback {
        Fallback::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .try_init()
                .map_err(|e| SimError::logging(e.to_string()))?;
        }
        Fallback::Silent => {}
    }

    Ok(None)
}
