//! Server-side session registry and the extractor that resolves a bearer
//! token to its session.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use palace_core::error::DomainError;
use palace_core::session::{SessionState, SessionUser};
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Maps opaque bearer tokens to live sessions. Idle sessions expire after
/// the configured TTL.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<Uuid, SessionState>>,
    ttl: Duration,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, SessionState>>, DomainError> {
        self.sessions
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("session registry poisoned: {e}")))
    }

    /// Starts a session for `user` and returns its token. Expired sessions
    /// are swept on the way.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn create(&self, user: SessionUser, now: DateTime<Utc>) -> Result<Uuid, DomainError> {
        let token = Uuid::new_v4();
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.ttl));
        if sessions.len() < before {
            debug!(swept = before - sessions.len(), "expired sessions removed");
        }
        sessions.insert(token, SessionState::new(user, now));
        Ok(token)
    }

    /// Looks up a live session and marks it as seen at `now`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthenticated` for an unknown or expired
    /// token.
    pub fn touch(&self, token: Uuid, now: DateTime<Utc>) -> Result<SessionState, DomainError> {
        self.update(token, now, |_| {})
    }

    /// Applies `change` to a live session and returns the updated copy.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthenticated` for an unknown or expired
    /// token.
    pub fn update<F>(
        &self,
        token: Uuid,
        now: DateTime<Utc>,
        change: F,
    ) -> Result<SessionState, DomainError>
    where
        F: FnOnce(&mut SessionState),
    {
        let mut sessions = self.lock()?;
        let expired = match sessions.get(&token) {
            None => return Err(DomainError::Unauthenticated),
            Some(session) => session.is_expired(now, self.ttl),
        };
        if expired {
            sessions.remove(&token);
            debug!("session expired");
            return Err(DomainError::Unauthenticated);
        }
        let session = sessions
            .get_mut(&token)
            .ok_or(DomainError::Unauthenticated)?;
        change(session);
        session.last_seen = now;
        Ok(session.clone())
    }

    /// Ends a session. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn remove(&self, token: Uuid) -> Result<bool, DomainError> {
        Ok(self.lock()?.remove(&token).is_some())
    }

    /// Number of sessions held, expired or not.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn count(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.len())
    }
}

/// The session resolved from the request's `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub token: Uuid,
    pub state: SessionState,
}

fn bearer_token(parts: &Parts) -> Option<Uuid> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Uuid::parse_str(token.trim()).ok()
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(DomainError::Unauthenticated)?;
        let session = state.sessions.touch(token, state.clock.now())?;
        Ok(Self {
            token,
            state: session,
        })
    }
}
