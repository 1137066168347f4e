//! Scene generator backed by the Gemini `generateContent` API.

use std::time::Duration;

use async_trait::async_trait;
use palace_core::error::DomainError;
use palace_core::gateway::SceneGenerator;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{GatewayError, require_api_key};

/// Public Gemini endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Whole-request timeout. Expiry surfaces as a generation failure.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Configuration with the default model and a 30 second timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Calls Gemini once per prompt and returns the first candidate's text.
#[derive(Debug, Clone)]
pub struct GeminiSceneGenerator {
    client: Client,
    config: GeminiConfig,
    base_url: String,
}

impl GeminiSceneGenerator {
    /// Creates a generator against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingApiKey` for a blank key, or
    /// `GatewayError::Http` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        Self::with_base_url(config, DEFAULT_GEMINI_BASE_URL.to_owned())
    }

    /// Creates a generator against a custom base URL.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiSceneGenerator::new`].
    pub fn with_base_url(config: GeminiConfig, base_url: String) -> Result<Self, GatewayError> {
        require_api_key(&config.api_key)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Sends one `generateContent` request.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure, timeout, a non-success
    /// status, or a response without text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.config.model
        );
        let request = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::from_response(response).await);
        }

        let body: GenerateResponse = response.json().await?;
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl SceneGenerator for GeminiSceneGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        match self.generate_text(prompt).await {
            Ok(text) => {
                debug!(model = %self.config.model, chars = text.len(), "scene generated");
                Ok(text)
            }
            Err(e) => {
                error!(
                    model = %self.config.model,
                    timed_out = e.is_timeout(),
                    error = %e,
                    "Gemini generation failed"
                );
                Err(DomainError::GenerationUnavailable(e.to_string()))
            }
        }
    }
}
