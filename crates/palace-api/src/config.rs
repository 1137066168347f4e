//! Server configuration, read once at startup from the environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use palace_core::catalog::{AvatarPreset, Catalog};
use palace_core::language::LanguageCode;
use palace_gateways::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use palace_gateways::identity::DEFAULT_IDENTITY_BASE_URL;
use palace_gateways::translate::DEFAULT_TRANSLATE_BASE_URL;

use crate::error::AppError;

/// Everything the server needs to start.
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Client timeout for scene generation.
    pub generation_timeout: Duration,
    pub translate_api_key: String,
    pub translate_base_url: String,
    pub identity_api_key: String,
    pub identity_base_url: String,
    /// Idle time after which a session is dropped.
    pub session_ttl: chrono::Duration,
    pub enabled_languages: Vec<LanguageCode>,
    pub enabled_avatars: Vec<AvatarPreset>,
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_max_connections", &self.database_max_connections)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("generation_timeout", &self.generation_timeout)
            .field("translate_base_url", &self.translate_base_url)
            .field("identity_base_url", &self.identity_base_url)
            .field("session_ttl", &self.session_ttl)
            .field("enabled_languages", &self.enabled_languages)
            .field("enabled_avatars", &self.enabled_avatars)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("otlp_endpoint", &self.otlp_endpoint)
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let generation_timeout_secs: u64 = parse_or(&get, "GENERATION_TIMEOUT_SECS", 30)?;
        if generation_timeout_secs == 0 {
            return Err(AppError::Config(
                "GENERATION_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }
        let session_ttl_secs: u32 = parse_or(&get, "SESSION_TTL_SECS", 86_400)?;
        if session_ttl_secs == 0 {
            return Err(AppError::Config(
                "SESSION_TTL_SECS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_or(&get, "PORT", 3000)?,
            database_url: required(&get, "DATABASE_URL")?,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            gemini_api_key: required(&get, "GEMINI_API_KEY")?,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_owned()),
            generation_timeout: Duration::from_secs(generation_timeout_secs),
            translate_api_key: required(&get, "TRANSLATE_API_KEY")?,
            translate_base_url: get("TRANSLATE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TRANSLATE_BASE_URL.to_owned()),
            identity_api_key: required(&get, "IDENTITY_API_KEY")?,
            identity_base_url: get("IDENTITY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IDENTITY_BASE_URL.to_owned()),
            session_ttl: chrono::Duration::seconds(i64::from(session_ttl_secs)),
            enabled_languages: parse_list(&get, "ENABLED_LANGUAGES")?,
            enabled_avatars: parse_list(&get, "ENABLED_AVATARS")?,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The languages and avatars this deployment offers. Unset lists
    /// enable everything.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(
            self.enabled_languages.clone(),
            self.enabled_avatars.clone(),
        )
    }

    /// `host:port` to bind.
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, AppError> {
    get(key).ok_or_else(|| AppError::Config(format!("{key} environment variable must be set")))
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    get(key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid ({raw:?}): {e}")))
    })
}

/// Comma-separated list; unset means an empty list, which the catalog reads
/// as "everything enabled".
fn parse_list<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Vec<T>, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(raw) = get(key) else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse()
                .map_err(|e| AppError::Config(format!("{key} contains {item:?}: {e}")))
        })
        .collect()
}
