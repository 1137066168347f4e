//! Helpers shared by the route unit tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use palace_core::catalog::Catalog;
use palace_core::gateway::Credential;
use palace_core::session::SessionUser;
use palace_test_support::{
    FixedClock, InMemoryPalaceRepository, InMemoryProfileRepository, StubIdentityGateway,
    StubSceneGenerator, StubTranslator,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::session::SessionRegistry;
use crate::state::{AppState, Gateways, Stores};

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// The catalog a deployment gets when only the required variables are set.
pub(crate) fn default_config_catalog() -> Catalog {
    let config = ApiConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/palace".to_owned()),
        "GEMINI_API_KEY" | "TRANSLATE_API_KEY" | "IDENTITY_API_KEY" => Some("key".to_owned()),
        _ => None,
    })
    .unwrap();
    config.catalog()
}

/// App state over in-memory fakes, with typed handles on each fake.
pub(crate) struct TestContext {
    pub identity: Arc<StubIdentityGateway>,
    pub generator: Arc<StubSceneGenerator>,
    pub translator: Arc<StubTranslator>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub palaces: Arc<InMemoryPalaceRepository>,
    pub state: AppState,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        Self::with(
            StubSceneGenerator::replying("A glowing leaf hums on the sofa."),
            StubTranslator::replying("एक चमकती पत्ती"),
            Catalog::default(),
        )
    }

    pub(crate) fn with(
        generator: StubSceneGenerator,
        translator: StubTranslator,
        catalog: Catalog,
    ) -> Self {
        let identity = Arc::new(StubIdentityGateway::new());
        let generator = Arc::new(generator);
        let translator = Arc::new(translator);
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let palaces = Arc::new(InMemoryPalaceRepository::new());
        let state = AppState::new(
            Arc::new(FixedClock(fixed_now())),
            Gateways {
                identity: identity.clone(),
                generator: generator.clone(),
                translator: translator.clone(),
            },
            Stores {
                profiles: profiles.clone(),
                palaces: palaces.clone(),
            },
            catalog,
            SessionRegistry::new(chrono::Duration::hours(1)),
        );
        Self {
            identity,
            generator,
            translator,
            profiles,
            palaces,
            state,
        }
    }

    /// Opens a session for a user with no stored profile and returns its
    /// token.
    pub(crate) fn open_session(&self, user_id: &str, email: &str) -> Uuid {
        let user = SessionUser::from_credential(
            Credential {
                user_id: palace_core::profile::UserId::new(user_id),
                email: email.to_owned(),
                display_name: None,
            },
            None,
        );
        self.state.sessions.create(user, fixed_now()).unwrap()
    }
}

/// Sends one request and returns the status and JSON body. An empty body
/// reads as `Null`; a non-JSON body (such as an extractor rejection) reads
/// as a string.
pub(crate) async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<Uuid>,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}
