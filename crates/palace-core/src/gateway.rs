//! Ports for the external collaborators: identity provider, scene generator
//! and translator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::language::LanguageCode;
use crate::profile::UserId;

/// Prefix marking a failed translation when it is rendered as text.
pub const TRANSLATION_FAILURE_MARKER: &str = "❌ Translation failed:";

/// What the identity provider returns for an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Provider-issued account identifier.
    pub user_id: UserId,
    /// Email the account is registered under.
    pub email: String,
    /// Display name held by the provider, if any.
    pub display_name: Option<String>,
}

/// Account creation and password sign-in.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Creates an account.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credential, DomainError>;

    /// Authenticates an existing account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, DomainError>;
}

/// Turns a prompt into a scene.
#[async_trait]
pub trait SceneGenerator: Send + Sync {
    /// Generates a scene. Quota exhaustion and timeouts both surface as
    /// `DomainError::GenerationUnavailable`.
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}

/// Result of a translation attempt. Translators never fail the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum TranslationOutcome {
    /// The translated text.
    Translated(String),
    /// Why the translation did not happen.
    Failed(String),
}

impl TranslationOutcome {
    /// Text to show the user: the translation, or the reason behind the
    /// failure marker.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Translated(text) => text.clone(),
            Self::Failed(reason) => format!("{TRANSLATION_FAILURE_MARKER} {reason}"),
        }
    }

    /// The translated text, if the translation succeeded.
    #[must_use]
    pub fn translated(&self) -> Option<&str> {
        match self {
            Self::Translated(text) => Some(text),
            Self::Failed(_) => None,
        }
    }
}

/// Translates generated scenes.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into `target`, detecting the source language.
    async fn translate(&self, text: &str, target: LanguageCode) -> TranslationOutcome;
}
