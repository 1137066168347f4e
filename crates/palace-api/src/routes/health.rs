//! Liveness endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Crate version of the running binary.
    pub version: &'static str,
    /// Sessions held in memory, including ones not yet swept.
    pub sessions: usize,
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.sessions.count()?,
    }))
}

/// Returns the health router, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
