//! Error types for the domain layer

use thiserror::Error;

/// Errors raised while building domain values from external identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Database name outside the fixed URI template table
    #[error("Unknown ontology database: {0}")]
    UnknownDatabase(String),

    /// Compact identifier without a `DB:ID` separator
    #[error("Malformed CURIE: {0}")]
    MalformedCurie(String),

    /// Confidence string that is not one of LOW, MEDIUM, GOOD, HIGH
    #[error("Unknown confidence class: {0}")]
    UnknownConfidence(String),
}
