//! Routes for the signed-in user's profile: read view, edit mode and save.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use palace_core::profile::{Profession, ProfileUpdate};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use palace_accounts::application::query_handlers::{self, ProfileView};
use palace_accounts::application::command_handlers;
use palace_accounts::domain::commands;

use crate::error::ApiError;
use crate::session::CurrentSession;
use crate::state::AppState;

/// Which screen the profile is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileMode {
    View,
    Edit,
}

impl ProfileMode {
    fn from_flag(editing: bool) -> Self {
        if editing { Self::Edit } else { Self::View }
    }
}

/// Response body for every profile route.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub mode: ProfileMode,
    pub profile: ProfileView,
}

/// Request body for PUT /profile. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub username: Option<String>,
    /// Student, Professional or Other.
    pub profession: Option<String>,
    pub biography: Option<String>,
    /// Avatar name such as `Fox`.
    pub avatar: Option<String>,
}

impl UpdateProfileRequest {
    fn into_update(self, state: &AppState) -> Result<ProfileUpdate, ApiError> {
        let avatar_ref = match self.avatar.as_deref() {
            Some(raw) => Some(state.catalog.require_avatar(raw.parse()?)?.url()),
            None => None,
        };
        Ok(ProfileUpdate {
            display_name: self.display_name.map(|s| s.trim().to_owned()),
            username: self.username.map(|s| s.trim().to_owned()),
            profession: self
                .profession
                .as_deref()
                .map(str::parse::<Profession>)
                .transpose()?,
            biography: self.biography,
            avatar_ref,
        })
    }
}

/// GET /profile
#[instrument(skip(state, session), fields(user_id = %session.state.user.user_id))]
async fn get_profile(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = query_handlers::get_profile(&session.state.user, &*state.profiles).await?;
    Ok(Json(ProfileResponse {
        mode: ProfileMode::from_flag(session.state.profile_editing),
        profile,
    }))
}

/// POST /profile/edit
#[instrument(skip(state, session), fields(user_id = %session.state.user.user_id))]
async fn enter_edit_mode(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ProfileResponse>, ApiError> {
    let updated = state
        .sessions
        .update(session.token, state.clock.now(), |s| s.profile_editing = true)?;
    let profile = query_handlers::get_profile(&updated.user, &*state.profiles).await?;
    Ok(Json(ProfileResponse {
        mode: ProfileMode::Edit,
        profile,
    }))
}

/// PUT /profile
#[instrument(skip(state, session, request), fields(user_id = %session.state.user.user_id))]
async fn save_profile(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let command = commands::UpdateProfile {
        correlation_id: Uuid::new_v4(),
        user_id: session.state.user.user_id.clone(),
        email: session.state.user.email.clone(),
        update: request.into_update(&state)?,
    };

    info!(correlation_id = %command.correlation_id, "handling update_profile command");

    let profile = command_handlers::handle_update_profile(&command, &*state.profiles).await?;

    state
        .sessions
        .update(session.token, state.clock.now(), |s| {
            s.user.merge_profile(&profile);
            s.profile_editing = false;
        })?;

    Ok(Json(ProfileResponse {
        mode: ProfileMode::View,
        profile: ProfileView::from(profile),
    }))
}

/// Returns the router for the profile.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(save_profile))
        .route("/edit", post(enter_edit_mode))
}
