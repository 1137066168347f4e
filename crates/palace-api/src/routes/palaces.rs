//! Routes for the generation context: create a palace, list past palaces.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use palace_core::catalog::PalaceLocation;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use palace_generation::application::command_handlers::{self, GeneratedPalace};
use palace_generation::application::query_handlers::{self, PalaceHistoryView};
use palace_generation::domain::commands;

use crate::error::ApiError;
use crate::session::CurrentSession;
use crate::state::AppState;

/// Request body for POST /palaces.
#[derive(Debug, Deserialize)]
pub struct GeneratePalaceRequest {
    /// What the user wants to remember.
    pub topic: String,
    /// `{"kind": "preset", "value": "library"}` or
    /// `{"kind": "custom", "value": "Grandma's kitchen"}`.
    pub location: PalaceLocation,
}

/// POST /palaces
#[instrument(skip(state, session, request), fields(user_id = %session.state.user.user_id))]
async fn generate_palace(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(request): Json<GeneratePalaceRequest>,
) -> Result<(StatusCode, Json<GeneratedPalace>), ApiError> {
    let command = commands::GeneratePalace {
        correlation_id: Uuid::new_v4(),
        owner_id: session.state.user.user_id.clone(),
        topic: request.topic,
        location: request.location,
        language: session.state.language,
    };

    info!(correlation_id = %command.correlation_id, "handling generate_palace command");

    let generated = command_handlers::handle_generate_palace(
        &command,
        &session.state.submission_gate(),
        state.clock.as_ref(),
        &*state.generator,
        &*state.translator,
        &*state.palaces,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(generated)))
}

/// GET /palaces
#[instrument(skip(state, session), fields(user_id = %session.state.user.user_id))]
async fn list_palaces(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<PalaceHistoryView>, ApiError> {
    let history = query_handlers::list_palaces(&session.state.user.user_id, &*state.palaces).await?;
    Ok(Json(history))
}

/// Returns the router for palaces.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_palaces).post(generate_palace))
}
