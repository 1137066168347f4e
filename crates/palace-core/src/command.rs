//! Command abstractions.

use uuid::Uuid;

use crate::profile::UserId;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// The signed-in user on whose behalf the command runs. `None` for
    /// sign-up and sign-in, which run before there is a session.
    fn acting_user(&self) -> Option<&UserId> {
        None
    }

    /// `acting_user` as a log field value, `-` when there is none.
    fn actor(&self) -> &str {
        self.acting_user().map_or("-", UserId::as_str)
    }
}
