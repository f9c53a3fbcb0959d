//! Logging initialization
//!
//! Call sites use the `log` facade; records are bridged into a
//! `tracing-subscriber` registry that writes to the console and a log file.

use anyhow::{Context, Result};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config;

/// Initialize logger for both console and file output
///
/// The filter comes from `RUST_LOG` when set, otherwise from `LOG_LEVEL`.
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a global logger is already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).with_context(|| format!("create log file {}", log_file_path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config::LOG_LEVEL.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(log_file)))
        .try_init()
        .context("initialize logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    #[test]
    fn test_init_logger_rejects_missing_directory() {
        let result = init_logger("/nonexistent-dir/staffbot/app.log");
        assert!(result.is_err());
    }

    #[test]
    fn test_init_logger_creates_log_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        // A second global init in the same test binary fails, so only the
        // file side effect is asserted.
        let _ = init_logger(path);
        assert!(temp_file.path().exists());
    }
}
