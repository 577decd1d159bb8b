//! Common error types for the SUSA import pipeline

use thiserror::Error;

/// Result type for import pipeline operations
pub type Result<T> = std::result::Result<T, ImportError>;

/// Error taxonomy for one pipeline run
///
/// A run either completes or fails atomically: `Fetch`, `Api` and `Parse`
/// abort the run with no partial result. `Structural` describes a single
/// malformed record; the aggregator downgrades it to a skip-with-warning so
/// that one bad catalog entry cannot take down the whole import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Network failure while talking to the catalog API
    #[error("Network error: {0}")]
    Fetch(String),

    /// Catalog API returned a non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body was not valid JSON or the page envelope was malformed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A record was missing an expected nested field
    #[error("Structural error: {0}")]
    Structural(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
