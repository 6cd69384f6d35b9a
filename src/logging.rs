//! Logging initialization.
//!
//! Logs go to stderr by default. With `logging.to_file` set they are written
//! to `parcel-desk-{datetime}.log` under the per-user data directory instead.

use anyhow::Result;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes buffered file logs when dropped. Keep it alive in `main`.
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file, when file logging is on.
    pub log_file_path: Option<PathBuf>,
}

/// Directory log files are written to.
pub fn logs_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "parcel-desk")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Effective filter directive. `dev` forces debug.
fn level_directive(config: &LoggingConfig, dev: bool) -> String {
    if dev { "debug".to_string() } else { config.level.clone() }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig, dev: bool) -> Result<LoggingHandle> {
    let level = level_directive(config, dev);
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or(level));

    if config.to_file {
        let dir = logs_dir();
        std::fs::create_dir_all(&dir)?;

        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
        let filename = format!("parcel-desk-{timestamp}.log");
        let log_file_path = dir.join(&filename);

        let file_appender = tracing_appender::rolling::never(&dir, &filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();

        Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_forces_debug() {
        let config = LoggingConfig::default();
        assert_eq!(level_directive(&config, false), "info");
        assert_eq!(level_directive(&config, true), "debug");
    }

    #[test]
    fn test_logs_dir_ends_in_logs() {
        assert!(logs_dir().ends_with("logs"));
    }
}
