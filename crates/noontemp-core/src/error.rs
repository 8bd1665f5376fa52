//! Error types for noontemp-core.
//!
//! The resampling engine itself never returns these for observation input:
//! malformed observations are skipped and incomplete days are filtered out.
//! Errors surface only from the edges (timestamp decomposition of a single
//! key, configuration values, and the provider document as a whole).

use thiserror::Error;

/// The main error type for noontemp operations.
#[derive(Debug, Error)]
pub enum NoonTempError {
    /// Observation timestamp could not be split into date and time of day.
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// Anchor configuration is inconsistent.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Provider document is unusable as a whole.
    #[error("Feed error: {0}")]
    Feed(String),

    /// Error parsing a configuration value.
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type alias for noontemp operations.
pub type Result<T> = std::result::Result<T, NoonTempError>;
