//! Rollcall Server Library
//!
//! HTTP service that pulls generated users from an upstream API into `SQLite`
//! and serves them back.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod observe;
pub mod services;
pub mod state;

#[cfg(test)]
mod log_capture;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use observe::{Operation, Thresholds};
pub use services::{CountPolicy, Ingestor};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full router, with every route nested under `/api`
pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/fetch-users", post(api::users::fetch_users))
        .route("/users", get(api::users::list_users))
        .route("/user-count", get(api::users::user_count))
        .route("/trigger-failure", get(api::users::trigger_failure));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
