//! Translator backed by the Google Cloud Translation v2 REST API.

use std::time::Duration;

use async_trait::async_trait;
use palace_core::gateway::{TranslationOutcome, Translator};
use palace_core::language::LanguageCode;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GatewayError, require_api_key};

/// Public Translation endpoint.
pub const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translation.googleapis.com";

/// Translation client configuration.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub api_key: String,
    pub timeout: Duration,
}

impl TranslateConfig {
    /// Configuration with a 30 second timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Translates with the source language auto-detected.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    config: TranslateConfig,
    base_url: String,
}

impl GoogleTranslator {
    /// Creates a translator against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingApiKey` for a blank key, or
    /// `GatewayError::Http` if the HTTP client cannot be built.
    pub fn new(config: TranslateConfig) -> Result<Self, GatewayError> {
        Self::with_base_url(config, DEFAULT_TRANSLATE_BASE_URL.to_owned())
    }

    /// Creates a translator against a custom base URL.
    ///
    /// # Errors
    ///
    /// Same as [`GoogleTranslator::new`].
    pub fn with_base_url(config: TranslateConfig, base_url: String) -> Result<Self, GatewayError> {
        require_api_key(&config.api_key)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn translate_once(
        &self,
        text: &str,
        target: LanguageCode,
    ) -> Result<String, GatewayError> {
        let url = format!("{}/language/translate/v2", self.base_url);
        let request = TranslateRequest {
            q: text,
            target: target.code(),
            format: "text",
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

        let body: TranslateResponse = response.json().await?;
        body.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or(GatewayError::EmptyResponse)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: LanguageCode) -> TranslationOutcome {
        match self.translate_once(text, target).await {
            Ok(translated) => TranslationOutcome::Translated(translated),
            Err(e) => {
                warn!(language = %target, error = %e, "translation request failed");
                TranslationOutcome::Failed(e.to_string())
            }
        }
    }
}
