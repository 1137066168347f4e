//! Routes for the accounts context: sign-up, sign-in and sign-out.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use palace_core::catalog::AvatarPreset;
use palace_core::profile::Profession;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use palace_accounts::application::command_handlers;
use palace_accounts::domain::commands;

use crate::error::ApiError;
use crate::routes::session::SessionView;
use crate::session::CurrentSession;
use crate::state::AppState;

/// Request body for POST /sign-up.
#[derive(Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// Full name.
    pub display_name: String,
    pub username: String,
    /// Student, Professional or Other. Defaults to Student.
    #[serde(default)]
    pub profession: Option<String>,
    /// Avatar name such as `Fox`. Defaults to the first enabled avatar.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Request body for POST /sign-in.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response body for a successful sign-up or sign-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: Uuid,
    pub session: SessionView,
}

fn start_session(
    state: &AppState,
    user: palace_core::session::SessionUser,
) -> Result<AuthResponse, ApiError> {
    let now = state.clock.now();
    let token = state.sessions.create(user, now)?;
    let session = state.sessions.touch(token, now)?;
    Ok(AuthResponse {
        token,
        session: SessionView::from(&session),
    })
}

/// POST /sign-up
#[instrument(skip(state, request))]
async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let profession = request
        .profession
        .as_deref()
        .map(str::parse::<Profession>)
        .transpose()?
        .unwrap_or_default();
    let avatar = match request.avatar.as_deref() {
        Some(raw) => state.catalog.require_avatar(raw.parse()?)?,
        None => state
            .catalog
            .avatars()
            .first()
            .copied()
            .unwrap_or(AvatarPreset::Lion),
    };

    let command = commands::SignUp {
        correlation_id: Uuid::new_v4(),
        email: request.email,
        password: request.password,
        display_name: request.display_name,
        username: request.username,
        profession,
        avatar,
    };

    info!(correlation_id = %command.correlation_id, "handling sign_up command");

    let user =
        command_handlers::handle_sign_up(&command, &*state.identity, &*state.profiles).await?;

    Ok((StatusCode::CREATED, Json(start_session(&state, user)?)))
}

/// POST /sign-in
#[instrument(skip(state, request))]
async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let command = commands::SignIn {
        correlation_id: Uuid::new_v4(),
        email: request.email,
        password: request.password,
    };

    info!(correlation_id = %command.correlation_id, "handling sign_in command");

    let user =
        command_handlers::handle_sign_in(&command, &*state.identity, &*state.profiles).await?;

    Ok(Json(start_session(&state, user)?))
}

/// POST /sign-out
#[instrument(skip(state, session), fields(user_id = %session.state.user.user_id))]
async fn sign_out(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(session.token)?;
    info!("signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::Method;
    use palace_core::catalog::Catalog;
    use palace_core::profile::UserId;
    use palace_test_support::{StubSceneGenerator, StubTranslator};
    use serde_json::{Value, json};

    use crate::routes::testing::{TestContext, send};

    fn sign_up_body(email: &str) -> Value {
        json!({
            "email": email,
            "password": "correct horse",
            "display_name": "Ada Lovelace",
            "username": "ada",
            "profession": "Professional",
            "avatar": "Dragon"
        })
    }

    #[tokio::test]
    async fn test_sign_up_returns_201_with_token_and_writes_profile() {
        // Arrange
        let ctx = TestContext::new();
        let app = router().with_state(ctx.state.clone());

        // Act
        let (status, json) = send(
            app,
            Method::POST,
            "/sign-up",
            None,
            Some(&sign_up_body("ada@example.com")),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::CREATED);
        let token = Uuid::parse_str(json["token"].as_str().unwrap()).unwrap();
        assert!(ctx.state.sessions.touch(token, ctx.state.clock.now()).is_ok());
        assert_eq!(json["session"]["greeting"], "Ada Lovelace");
        let stored = ctx.profiles.stored(&UserId::new("uid-1")).unwrap();
        assert_eq!(stored.profession, Profession::Professional);
        assert_eq!(stored.avatar_ref, AvatarPreset::Dragon.url());
    }

    #[tokio::test]
    async fn test_sign_up_defaults_profession_and_avatar() {
        let ctx = TestContext::new();
        let body = json!({
            "email": "ada@example.com",
            "password": "pw",
            "display_name": "Ada",
            "username": "ada"
        });

        let (status, _) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-up",
            None,
            Some(&body),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let stored = ctx.profiles.stored(&UserId::new("uid-1")).unwrap();
        assert_eq!(stored.profession, Profession::Student);
        assert_eq!(stored.avatar_ref, AvatarPreset::Lion.url());
    }

    #[tokio::test]
    async fn test_sign_up_with_malformed_email_never_reaches_provider() {
        let ctx = TestContext::new();

        let (status, json) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-up",
            None,
            Some(&sign_up_body("not-an-email")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
        assert_eq!(ctx.identity.sign_up_calls(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_with_disabled_avatar_is_rejected() {
        let ctx = TestContext::with(
            StubSceneGenerator::replying("S"),
            StubTranslator::replying("T"),
            Catalog::new(Vec::new(), vec![AvatarPreset::Fox]),
        );

        let (status, _) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-up",
            None,
            Some(&sign_up_body("ada@example.com")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(ctx.identity.sign_up_calls(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_sign_up_is_generic_failure() {
        let ctx = TestContext::new();
        ctx.identity.register("ada@example.com", "pw");

        let (status, json) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-up",
            None,
            Some(&sign_up_body("ada@example.com")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "sign_up_failed");
        assert_eq!(json["message"], "sign up failed");
    }

    #[tokio::test]
    async fn test_sign_in_returns_token() {
        let ctx = TestContext::new();
        ctx.identity.register("grace@example.com", "cobol");

        let (status, json) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-in",
            None,
            Some(&json!({ "email": "grace@example.com", "password": "cobol" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["token"].is_string());
        assert_eq!(json["session"]["greeting"], "grace");
    }

    #[tokio::test]
    async fn test_sign_in_failures_share_one_response() {
        // Arrange
        let ctx = TestContext::new();
        ctx.identity.register("grace@example.com", "cobol");

        // Act
        let (wrong_status, wrong_json) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-in",
            None,
            Some(&json!({ "email": "grace@example.com", "password": "fortran" })),
        )
        .await;
        let (unknown_status, unknown_json) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-in",
            None,
            Some(&json!({ "email": "nobody@example.com", "password": "cobol" })),
        )
        .await;

        // Assert
        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_json, unknown_json);
        assert_eq!(wrong_json["message"], "invalid email or password");
    }

    #[tokio::test]
    async fn test_sign_out_ends_the_session() {
        let ctx = TestContext::new();
        let token = ctx.open_session("uid-1", "ada@example.com");

        let (status, _) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-out",
            Some(token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(ctx.state.sessions.touch(token, ctx.state.clock.now()).is_err());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_401() {
        let ctx = TestContext::new();

        let (status, _) = send(
            router().with_state(ctx.state.clone()),
            Method::POST,
            "/sign-out",
            None,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
