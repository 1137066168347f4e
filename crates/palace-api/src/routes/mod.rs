//! HTTP route modules, one per area of the API.

pub mod auth;
pub mod catalog;
pub mod health;
pub mod palaces;
pub mod profile;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

use axum::Router;

use crate::state::AppState;

/// Every route, mounted where the server serves it.
pub fn api_router() -> Router<AppState> {
    Router::new().merge(health::router()).nest(
        "/api/v1",
        Router::new()
            .merge(catalog::router())
            .nest("/auth", auth::router())
            .nest("/session", session::router())
            .nest("/profile", profile::router())
            .nest("/palaces", palaces::router()),
    )
}
