//! Identity provider backed by the Identity Toolkit REST API
//! (email and password accounts).

use std::time::Duration;

use async_trait::async_trait;
use palace_core::error::DomainError;
use palace_core::gateway::{Credential, IdentityGateway};
use palace_core::profile::UserId;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GatewayError, require_api_key};

/// Public Identity Toolkit endpoint.
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Identity client configuration.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub api_key: String,
    pub timeout: Duration,
}

impl IdentityConfig {
    /// Configuration with a 30 second timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl From<AccountResponse> for Credential {
    fn from(account: AccountResponse) -> Self {
        Self {
            user_id: UserId::new(account.local_id),
            email: account.email,
            display_name: account.display_name.filter(|name| !name.is_empty()),
        }
    }
}

/// Email and password accounts through Identity Toolkit.
#[derive(Debug, Clone)]
pub struct IdentityToolkitGateway {
    client: Client,
    config: IdentityConfig,
    base_url: String,
}

impl IdentityToolkitGateway {
    /// Creates a gateway against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingApiKey` for a blank key, or
    /// `GatewayError::Http` if the HTTP client cannot be built.
    pub fn new(config: IdentityConfig) -> Result<Self, GatewayError> {
        Self::with_base_url(config, DEFAULT_IDENTITY_BASE_URL.to_owned())
    }

    /// Creates a gateway against a custom base URL.
    ///
    /// # Errors
    ///
    /// Same as [`IdentityToolkitGateway::new`].
    pub fn with_base_url(config: IdentityConfig, base_url: String) -> Result<Self, GatewayError> {
        require_api_key(&config.api_key)?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn call(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, GatewayError> {
        let url = format!("{}/v1/accounts:{action}", self.base_url);
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
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

        let account: AccountResponse = response.json().await?;
        Ok(account.into())
    }

    async fn call_mapped(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, DomainError> {
        match self.call(action, email, password).await {
            Ok(credential) => {
                debug!(action, user_id = %credential.user_id, "identity call succeeded");
                Ok(credential)
            }
            Err(e) => {
                warn!(action, error = %e, "identity call failed");
                Err(DomainError::Identity(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl IdentityGateway for IdentityToolkitGateway {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Credential, DomainError> {
        self.call_mapped("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, DomainError> {
        self.call_mapped("signInWithPassword", email, password)
            .await
    }
}
