/// Users API routes
use crate::{
    error::{Result, ServerError},
    observe::{self, Operation},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use rollcall_core::{User, UserCount};
use serde::{Deserialize, Serialize};

/// Batch size for an ingestion, from the query string or the JSON body
#[derive(Debug, Default, Deserialize)]
pub struct FetchUsersParams {
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FetchUsersResponse {
    pub message: String,
}

impl FetchUsersResponse {
    pub fn stored(count: usize) -> Self {
        Self {
            message: format!("Successfully fetched and stored {} users", count),
        }
    }
}

/// POST /api/fetch-users?count=N
///
/// Also accepts `{"count": N}` as the body; the query parameter wins when both
/// are present. Missing or unparseable values fall back to the default count.
pub async fn fetch_users(
    State(app_state): State<AppState>,
    query: Option<Query<FetchUsersParams>>,
    body: Option<Json<FetchUsersParams>>,
) -> Result<Json<FetchUsersResponse>> {
    let requested = query
        .and_then(|Query(params)| params.count)
        .or_else(|| body.and_then(|Json(params)| params.count));

    let stored = app_state.ingestor.ingest(requested).await?;

    Ok(Json(FetchUsersResponse::stored(stored)))
}

/// GET /api/users
/// All stored users, newest first
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = observe::timed(
        Operation::ListUsers,
        &app_state.thresholds,
        app_state.store.list(),
    )
    .await?;

    observe::check_result_size(&app_state.thresholds, Operation::ListUsers, users.len());

    Ok(Json(users))
}

/// GET /api/user-count
pub async fn user_count(State(app_state): State<AppState>) -> Result<Json<UserCount>> {
    let total = observe::timed(
        Operation::CountUsers,
        &app_state.thresholds,
        app_state.store.count(),
    )
    .await?;

    observe::check_total(&app_state.thresholds, total);

    Ok(Json(UserCount { total }))
}

/// GET /api/trigger-failure
/// Always answers 500; exercises the error logging and response path
pub async fn trigger_failure(State(app_state): State<AppState>) -> ServerError {
    let failing = async { Err::<(), _>(app_state.store.probe_failure().await) };

    match observe::timed(Operation::TriggerFailure, &app_state.thresholds, failing).await {
        Err(e) => ServerError::Diagnostic(e),
        Ok(()) => {
            tracing::error!("Failure query unexpectedly succeeded");
            ServerError::Internal("failure query did not fail".to_string())
        }
    }
}
