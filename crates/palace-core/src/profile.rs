//! User profile documents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest biography a profile may carry, in characters.
pub const MAX_BIOGRAPHY_CHARS: usize = 300;

/// Opaque, provider-issued user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps a provider identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user does; one of three fixed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Profession {
    #[default]
    Student,
    Professional,
    Other,
}

impl Profession {
    /// Stored and displayed form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Professional => "Professional",
            Self::Other => "Other",
        }
    }
}

impl FromStr for Profession {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Self::Student),
            "Professional" => Ok(Self::Professional),
            "Other" => Ok(Self::Other),
            other => Err(DomainError::Validation(format!(
                "profession must be Student, Professional or Other, got {other:?}"
            ))),
        }
    }
}

/// A user's profile document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-issued identifier; the document key.
    pub id: UserId,
    /// Email captured at sign-up.
    pub email: String,
    /// Handle, shown as `@username`.
    pub username: String,
    /// Full name.
    pub display_name: String,
    /// Student, Professional or Other.
    pub profession: Profession,
    /// "About me" text, at most [`MAX_BIOGRAPHY_CHARS`] characters.
    pub biography: String,
    /// Avatar image reference.
    pub avatar_ref: String,
}

impl UserProfile {
    /// Applies a merge update in place. Fields absent from `update` keep
    /// their current value.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(display_name) = &update.display_name {
            self.display_name.clone_from(display_name);
        }
        if let Some(username) = &update.username {
            self.username.clone_from(username);
        }
        if let Some(profession) = update.profession {
            self.profession = profession;
        }
        if let Some(biography) = &update.biography {
            self.biography.clone_from(biography);
        }
        if let Some(avatar_ref) = &update.avatar_ref {
            self.avatar_ref.clone_from(avatar_ref);
        }
    }
}

/// Fields changed by a profile save. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub profession: Option<Profession>,
    pub biography: Option<String>,
    pub avatar_ref: Option<String>,
}

impl ProfileUpdate {
    /// Checks the biography length.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the biography is too long.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(biography) = &self.biography {
            validate_biography(biography)?;
        }
        Ok(())
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Rejects a biography longer than [`MAX_BIOGRAPHY_CHARS`] characters.
///
/// # Errors
///
/// Returns `DomainError::Validation` when the limit is exceeded.
pub fn validate_biography(biography: &str) -> Result<(), DomainError> {
    let length = biography.chars().count();
    if length > MAX_BIOGRAPHY_CHARS {
        return Err(DomainError::Validation(format!(
            "biography must be at most {MAX_BIOGRAPHY_CHARS} characters, got {length}"
        )));
    }
    Ok(())
}
