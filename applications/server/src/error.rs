/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rollcall_core::RollcallError;
use rollcall_storage::StorageError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("User source error: {0}")]
    Source(#[from] RollcallError),

    #[error("Database error: {0}")]
    Database(#[from] StorageError),

    /// An insert failed part-way through a batch; earlier rows stay stored
    #[error("Batch aborted after {stored} stored, {skipped} skipped: {source}")]
    BatchAborted {
        stored: usize,
        skipped: usize,
        source: StorageError,
    },

    /// Raised on purpose by `/api/trigger-failure`
    #[error("Intentional failure: {0}")]
    Diagnostic(StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// Short message returned to callers; never contains driver or upstream detail
    pub fn public_message(&self) -> &'static str {
        match self {
            ServerError::Source(_) | ServerError::BatchAborted { .. } => {
                "Failed to fetch and store users"
            }
            ServerError::Database(_) => "Database error",
            ServerError::Diagnostic(_) => "Intentional failure triggered",
            ServerError::Config(_) => "Configuration error",
            ServerError::Internal(_) => "Internal server error",
            ServerError::Io(_) => "IO error",
        }
    }
}

/// Failures are logged once, with their cause, where the operation ends
/// (see [`crate::observe::timed`]); the response only carries the short message.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = match self {
            ServerError::Diagnostic(_) => json!({
                "error": self.public_message(),
                "detail": "query against a missing table",
            }),
            _ => json!({ "error": self.public_message() }),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
