//! Typed errors for the visibility library.
//!
//! Uses `thiserror` for library errors (not `anyhow`); the CLI wraps these
//! with context.

use thiserror::Error;

/// Result type for visibility operations.
pub type Result<T> = std::result::Result<T, VisibilityError>;

/// Errors that can occur while configuring or running an analysis.
#[derive(Debug, Error)]
pub enum VisibilityError {
    /// Configuration error (missing API key, unparsable setting)
    #[error("configuration error: {0}")]
    Config(String),

    /// User input outside the accepted range
    #[error("invalid input: {0}")]
    Validation(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// Completion API error (non-2xx response, quota, auth)
    #[error("API error: {0}")]
    Api(String),

    /// Unexpected response or document format
    #[error("parse error: {0}")]
    Parse(String),

    /// Sentiment classifier failed on a piece of text
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Writing or reading an export file failed
    #[error("export error: {0}")]
    Export(#[from] std::io::Error),
}
