//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use palace_core::catalog::Catalog;
use palace_core::repository::{PalaceRepository, ProfileRepository};
use palace_store::pg_palace_repository::PgPalaceRepository;
use palace_store::pg_profile_repository::PgProfileRepository;
use palace_test_support::{
    InMemoryPalaceRepository, InMemoryProfileRepository, SteppingClock, StubIdentityGateway,
    StubSceneGenerator, StubTranslator,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use palace_api::server;
use palace_api::session::SessionRegistry;
use palace_api::state::{AppState, Gateways, Stores};

/// The full router plus handles on the stub gateways behind it.
pub struct TestApp {
    pub router: Router,
    pub identity: Arc<StubIdentityGateway>,
    pub generator: Arc<StubSceneGenerator>,
    pub translator: Arc<StubTranslator>,
}

impl TestApp {
    /// A copy of the router for one request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

fn build(profiles: Arc<dyn ProfileRepository>, palaces: Arc<dyn PalaceRepository>) -> TestApp {
    let identity = Arc::new(StubIdentityGateway::new());
    let generator = Arc::new(StubSceneGenerator::replying("S"));
    let translator = Arc::new(StubTranslator::replying("T"));
    // Each read of the clock advances it, so records sort by creation.
    let clock = SteppingClock::new(
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        chrono::Duration::seconds(1),
    );
    let state = AppState::new(
        Arc::new(clock),
        Gateways {
            identity: identity.clone(),
            generator: generator.clone(),
            translator: translator.clone(),
        },
        Stores { profiles, palaces },
        Catalog::default(),
        SessionRegistry::new(chrono::Duration::hours(24)),
    );
    let router = server::app(state, server::cors_layer(&[]).unwrap());

    TestApp {
        router,
        identity,
        generator,
        translator,
    }
}

/// Full app over in-memory stores and stub gateways.
pub fn build_test_app() -> TestApp {
    build(
        Arc::new(InMemoryProfileRepository::new()),
        Arc::new(InMemoryPalaceRepository::new()),
    )
}

/// Full app over the `PostgreSQL` stores and stub gateways.
pub fn build_pg_app(pool: PgPool) -> TestApp {
    build(
        Arc::new(PgProfileRepository::new(pool.clone())),
        Arc::new(PgPalaceRepository::new(pool)),
    )
}

/// Sends one request and returns the status and JSON body (`Null` when
/// empty).
pub async fn send(
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
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str, token: Option<Uuid>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<Uuid>,
    body: &Value,
) -> (StatusCode, Value) {
    send(app, Method::POST, uri, token, Some(body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    token: Option<Uuid>,
    body: &Value,
) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, token, Some(body)).await
}

/// Signs up a user through the API and returns the session token.
pub async fn sign_up(test_app: &TestApp, email: &str, username: &str) -> Uuid {
    let (status, json) = post_json(
        test_app.app(),
        "/api/v1/auth/sign-up",
        None,
        &json!({
            "email": email,
            "password": "correct horse",
            "display_name": "Ada Lovelace",
            "username": username,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "sign-up failed: {json}");
    Uuid::parse_str(json["token"].as_str().unwrap()).unwrap()
}

/// Request body for a palace at the Library preset.
pub fn library_palace(topic: &str) -> Value {
    json!({ "topic": topic, "location": { "kind": "preset", "value": "library" } })
}
