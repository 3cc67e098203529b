//! Health check handlers.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the data directory exists before returning OK.
/// Returns 503 Service Unavailable if it is missing.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match tokio::fs::metadata(&state.config().data_dir).await {
        Ok(meta) if meta.is_dir() => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}
