//! Commands for the generation context.

use palace_core::command::Command;
use palace_core::catalog::PalaceLocation;
use palace_core::language::LanguageCode;
use palace_core::profile::UserId;
use uuid::Uuid;

/// Command to generate a memory palace and record it.
#[derive(Debug, Clone)]
pub struct GeneratePalace {
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The signed-in user the palace will belong to.
    pub owner_id: UserId,
    /// What the user wants to remember.
    pub topic: String,
    /// Where the scene is set.
    pub location: PalaceLocation,
    /// The session's preferred language.
    pub language: LanguageCode,
}

impl Command for GeneratePalace {
    fn command_type(&self) -> &'static str {
        "generation.generate_palace"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn acting_user(&self) -> Option<&UserId> {
        Some(&self.owner_id)
    }
}
