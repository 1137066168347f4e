//! Routes for the signed-in session: who is signed in, and the language
//! scenes are translated into.

use axum::extract::State;
use axum::routing::{get, put};
use axum::{Json, Router};
use palace_core::language::LanguageCode;
use palace_core::session::{SessionState, SessionUser};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::session::CurrentSession;
use crate::state::AppState;

/// What the client needs to render the signed-in shell.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub user: SessionUser,
    /// Name to greet the user by.
    pub greeting: String,
    pub language: LanguageCode,
    pub language_name: &'static str,
    /// Whether the profile screen is in edit mode.
    pub profile_editing: bool,
    /// Whether a palace is being generated right now.
    pub generation_pending: bool,
}

impl From<&SessionState> for SessionView {
    fn from(session: &SessionState) -> Self {
        Self {
            greeting: session.user.greeting_name().to_owned(),
            user: session.user.clone(),
            language: session.language,
            language_name: session.language.display_name(),
            profile_editing: session.profile_editing,
            generation_pending: session.submission_gate().is_busy(),
        }
    }
}

/// Request body for PUT /session/language.
#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    /// Language code such as `hi`.
    pub language: String,
}

/// GET /session
async fn get_session(session: CurrentSession) -> Json<SessionView> {
    Json(SessionView::from(&session.state))
}

/// PUT /session/language
#[instrument(skip(state, session, request), fields(user_id = %session.state.user.user_id))]
async fn set_language(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(request): Json<SetLanguageRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let language = state.catalog.require_language(request.language.parse()?)?;

    let updated = state
        .sessions
        .update(session.token, state.clock.now(), |s| s.language = language)?;

    info!(language = %language, "session language changed");

    Ok(Json(SessionView::from(&updated)))
}

/// Returns the router for the session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/language", put(set_language))
}
