//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be loaded
    #[error(transparent)]
    ConfigFile(#[from] ontomap_resolver::ConfigError),

    /// Resolver could not be built
    #[error(transparent)]
    Resolver(#[from] ontomap_resolver::ResolverError),

    /// HTTP client could not be built
    #[error("Client error: {0}")]
    Client(#[from] ontomap_client::ClientError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed trait list line
    #[error("Invalid input at line {line}: {message}")]
    InvalidInput {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Logging could not be initialised
    #[error("Logging error: {0}")]
    Logging(String),
}
