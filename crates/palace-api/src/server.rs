//! Router assembly: routes, HTTP tracing and CORS.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::routes;
use crate::state::AppState;

/// CORS policy for the configured origins. No origins means any origin is
/// allowed, which suits local development.
///
/// # Errors
///
/// Returns `AppError::Config` if an origin is not a valid header value.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, AppError> {
    if allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| AppError::Config(format!("invalid CORS origin {origin:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
}

/// The complete application, ready to serve.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    routes::api_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_origin_list_is_accepted() {
        assert!(cors_layer(&[]).is_ok());
    }

    #[test]
    fn test_listed_origins_are_accepted() {
        let origins = vec![
            "http://localhost:5173".to_owned(),
            "https://palace.example.com".to_owned(),
        ];

        assert!(cors_layer(&origins).is_ok());
    }

    #[test]
    fn test_origin_with_control_characters_is_a_config_error() {
        let origins = vec!["http://bad\norigin".to_owned()];

        let result = cors_layer(&origins);

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
