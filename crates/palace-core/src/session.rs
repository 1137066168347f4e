//! Ephemeral per-session state.
//!
//! A session lives in process memory only. It is created at sign-up or
//! sign-in and destroyed at sign-out or after sitting idle past its TTL.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::DomainError;
use crate::gateway::Credential;
use crate::language::LanguageCode;
use crate::profile::{Profession, UserId, UserProfile};

/// The signed-in user: the provider credential with profile fields merged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: UserId,
    pub email: String,
    pub display_name: String,
    pub username: String,
    pub profession: Option<Profession>,
    pub biography: String,
    pub avatar_ref: Option<String>,
}

impl SessionUser {
    /// Builds the session user from a credential, overlaying the stored
    /// profile when there is one.
    #[must_use]
    pub fn from_credential(credential: Credential, profile: Option<&UserProfile>) -> Self {
        let mut user = Self {
            user_id: credential.user_id,
            email: credential.email,
            display_name: credential.display_name.unwrap_or_default(),
            username: String::new(),
            profession: None,
            biography: String::new(),
            avatar_ref: None,
        };
        if let Some(profile) = profile {
            user.merge_profile(profile);
        }
        user
    }

    /// Copies profile fields onto the session user.
    pub fn merge_profile(&mut self, profile: &UserProfile) {
        self.display_name.clone_from(&profile.display_name);
        self.username.clone_from(&profile.username);
        self.profession = Some(profile.profession);
        self.biography.clone_from(&profile.biography);
        self.avatar_ref = Some(profile.avatar_ref.clone());
    }

    /// Name used to greet the user: display name, else username, else the
    /// local part of the email.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        if !self.display_name.is_empty() {
            &self.display_name
        } else if !self.username.is_empty() {
            &self.username
        } else {
            self.email.split('@').next().unwrap_or_default()
        }
    }
}

/// Allows one palace generation at a time per session.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    busy: AtomicBool,
}

impl SubmissionGate {
    /// Claims the gate for one submission. The claim is released when the
    /// returned permit is dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SubmissionInProgress` if a permit is outstanding.
    pub fn try_acquire(self: &Arc<Self>) -> Result<SubmissionPermit, DomainError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DomainError::SubmissionInProgress)?;
        Ok(SubmissionPermit {
            gate: Arc::clone(self),
        })
    }

    /// Whether a submission is pending.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the session's submission slot.
#[derive(Debug)]
pub struct SubmissionPermit {
    gate: Arc<SubmissionGate>,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

/// Everything the server remembers about one session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The signed-in user.
    pub user: SessionUser,
    /// Language generated scenes are translated into.
    pub language: LanguageCode,
    /// Whether the profile screen is in edit mode.
    pub profile_editing: bool,
    /// Last time the session handled a request.
    pub last_seen: DateTime<Utc>,
    gate: Arc<SubmissionGate>,
}

impl SessionState {
    /// Starts a session with the default language and the profile in view mode.
    #[must_use]
    pub fn new(user: SessionUser, now: DateTime<Utc>) -> Self {
        Self {
            user,
            language: LanguageCode::default(),
            profile_editing: false,
            last_seen: now,
            gate: Arc::new(SubmissionGate::default()),
        }
    }

    /// The gate guarding generation for this session. Clones of the state
    /// share it.
    #[must_use]
    pub fn submission_gate(&self) -> Arc<SubmissionGate> {
        Arc::clone(&self.gate)
    }

    /// Whether the session has been idle for longer than `ttl`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_seen > ttl
    }
}
