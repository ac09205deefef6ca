//! Tracing subscriber setup.

use crate::error::{CliError, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is given
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Build the filter: an explicit level wins over `RUST_LOG`
pub fn log_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| CliError::Logging(format!("invalid log level '{}': {}", level, e))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

/// Install the global subscriber writing to stderr
pub fn init_logging(level: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(level)?)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
