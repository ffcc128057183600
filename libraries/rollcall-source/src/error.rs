//! Error types for the user source client.

use rollcall_core::RollcallError;
use thiserror::Error;

/// Errors that can occur when calling the upstream user generator.
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream returned a non-success response
    #[error("Upstream error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Upstream could not be reached (connect failure or timeout)
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    /// Invalid base URL
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse upstream response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

impl From<SourceError> for RollcallError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Status { status, message } => RollcallError::SourceStatus { status, message },
            SourceError::ParseError(msg) => RollcallError::SourcePayload(msg),
            other => RollcallError::SourceUnreachable(other.to_string()),
        }
    }
}
