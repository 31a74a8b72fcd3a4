//! Logging setup.
//!
//! [`init_logging`] is called once at process start. It installs a console
//! layer filtered by `RUST_LOG` (or the configured level) and an error-only
//! layer appending to `<error_log_dir>/error.log`. The returned [`LogHandle`]
//! must be kept alive for the error log to be flushed.

use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// File name of the error log inside the configured directory
pub const ERROR_LOG_FILE: &str = "error.log";

/// Keeps the error log writer running; flushes on drop
#[derive(Debug)]
pub struct LogHandle {
    error_log_path: PathBuf,
    _guard: WorkerGuard,
}

impl LogHandle {
    pub fn error_log_path(&self) -> &Path {
        &self.error_log_path
    }
}

/// Errors that can occur while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    LogDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Filter directive for the console, from config level and CLI verbosity
///
/// `quiet` wins over `verbose`; each `-v` raises the level one step.
pub fn log_filter(level: &str, verbose: u8, quiet: bool) -> String {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => level,
            1 => "debug",
            _ => "trace",
        }
    };
    format!("softscrape={}", level)
}

/// Error-only layer writing plain text lines to `writer`
pub fn error_file_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .with_filter(LevelFilter::ERROR)
}

/// Non-blocking writer appending to `<dir>/error.log`, creating `dir` if needed
pub fn error_log_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard, PathBuf), LoggingError> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::LogDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(dir, ERROR_LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    Ok((writer, guard, dir.join(ERROR_LOG_FILE)))
}

/// Install the global subscriber. Call once, at start-up.
pub fn init_logging(config: &LoggingConfig, verbose: u8, quiet: bool) -> Result<LogHandle, LoggingError> {
    let (writer, guard, error_log_path) = error_log_writer(&config.error_log_dir)?;

    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(log_filter(&config.level, verbose, quiet)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .with(error_file_layer(writer))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LogHandle {
        error_log_path,
        _guard: guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter("info", 0, false), "softscrape=info");
        assert_eq!(log_filter("warn", 1, false), "softscrape=debug");
        assert_eq!(log_filter("info", 3, false), "softscrape=trace");
        assert_eq!(log_filter("info", 2, true), "softscrape=error");
    }

    #[test]
    fn test_error_log_receives_only_errors() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("logs").join("errors");
        let (writer, guard, path) = error_log_writer(&log_dir).unwrap();

        let subscriber = tracing_subscriber::registry().with(error_file_layer(writer));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("This is an info message.");
            tracing::error!("This is a critical test error.");
        });
        drop(guard);

        assert_eq!(path, log_dir.join(ERROR_LOG_FILE));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("This is a critical test error."));
        assert!(content.contains("ERROR"));
        assert!(!content.contains("This is an info message."));
    }
}
