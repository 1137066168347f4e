//! Commands for the accounts context.

use std::fmt;

use palace_core::catalog::AvatarPreset;
use palace_core::command::Command;
use palace_core::profile::{Profession, ProfileUpdate, UserId};
use uuid::Uuid;

/// Command to create an account and its initial profile.
#[derive(Clone)]
pub struct SignUp {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub email: String,
    pub password: String,
    /// Full name.
    pub display_name: String,
    pub username: String,
    pub profession: Profession,
    pub avatar: AvatarPreset,
}

impl fmt::Debug for SignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUp")
            .field("correlation_id", &self.correlation_id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("username", &self.username)
            .field("profession", &self.profession)
            .field("avatar", &self.avatar)
            .finish()
    }
}

impl Command for SignUp {
    fn command_type(&self) -> &'static str {
        "accounts.sign_up"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to sign in with email and password.
#[derive(Clone)]
pub struct SignIn {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignIn")
            .field("correlation_id", &self.correlation_id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Command for SignIn {
    fn command_type(&self) -> &'static str {
        "accounts.sign_in"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to save edits to the signed-in user's profile.
#[derive(Debug, Clone)]
pub struct UpdateProfile {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Whose profile is being saved.
    pub user_id: UserId,
    /// Email of the signed-in user, used if no profile document exists yet.
    pub email: String,
    /// The changed fields.
    pub update: ProfileUpdate,
}

impl Command for UpdateProfile {
    fn command_type(&self) -> &'static str {
        "accounts.update_profile"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn acting_user(&self) -> Option<&UserId> {
        Some(&self.user_id)
    }
}
