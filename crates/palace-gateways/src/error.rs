//! Adapter error type shared by every HTTP gateway.

use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while talking to an external service.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("response contained no usable content")]
    EmptyResponse,

    #[error("missing API key")]
    MissingApiKey,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: Option<u16>,
    message: String,
}

impl GatewayError {
    /// Builds an `Api` error from a non-success response, preferring the
    /// Google-style `{"error": {"code", "message"}}` body when present.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|e| e.error)
        {
            Some(detail) => Self::Api {
                code: detail.code.unwrap_or(status),
                message: detail.message,
            },
            None => Self::Api {
                code: status,
                message: body,
            },
        }
    }

    /// Whether the error is a client timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}

pub(crate) fn require_api_key(api_key: &str) -> Result<(), GatewayError> {
    if api_key.trim().is_empty() {
        return Err(GatewayError::MissingApiKey);
    }
    Ok(())
}
