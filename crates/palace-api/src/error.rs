//! Memory Palace Builder — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use palace_core::error::DomainError;
use palace_gateways::GatewayError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Failures that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is missing or does not parse.
    #[error("configuration error: {0}")]
    Config(String),

    /// The pool could not connect.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// An HTTP adapter could not be constructed.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The span exporter could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Binding the listener or serving failed.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable code clients can branch on, such as `validation_error`.
    pub error: &'static str,
    /// Message safe to show the user.
    pub message: String,
}

/// A `DomainError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            DomainError::AuthenticationFailed => {
                (StatusCode::UNAUTHORIZED, "authentication_failed")
            }
            DomainError::SignUpFailed => (StatusCode::BAD_REQUEST, "sign_up_failed"),
            DomainError::SubmissionInProgress => (StatusCode::CONFLICT, "submission_in_progress"),
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            DomainError::GenerationUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "generation_unavailable")
            }
            DomainError::Identity(_) => (StatusCode::INTERNAL_SERVER_ERROR, "identity_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        if status.is_server_error() {
            error!(error = %self.0, code = error_code, "request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
