//! Error types for the Resolver

use ontomap_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while resolving a trait
///
/// Remote failures never appear here: they are retried and then reported as
/// absent results. Only conditions that must not be defaulted are raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// A returned identifier could not be turned into a URI
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Resolver built from an unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ResolverError {
    /// Whether the error names a database without a URI template
    pub fn is_unknown_database(&self) -> bool {
        matches!(self, ResolverError::Domain(DomainError::UnknownDatabase(_)))
    }
}

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Values parsed but failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
