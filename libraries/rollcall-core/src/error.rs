/// Core error types for Rollcall
use thiserror::Error;

/// Result type alias using `RollcallError`
pub type Result<T> = std::result::Result<T, RollcallError>;

/// Core error type for Rollcall
#[derive(Error, Debug)]
pub enum RollcallError {
    /// The upstream source could not be reached at all
    #[error("User source unreachable: {0}")]
    SourceUnreachable(String),

    /// The upstream source answered with a non-success status
    #[error("User source returned {status}: {message}")]
    SourceStatus {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        message: String,
    },

    /// The upstream payload did not have the expected shape
    #[error("Invalid user source payload: {0}")]
    SourcePayload(String),
}
