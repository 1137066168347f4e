//! Generated palace records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::LanguageCode;
use crate::profile::UserId;

/// One generated memory palace. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalaceRecord {
    /// Record identifier (UUID v7, so it sorts with creation time).
    pub id: Uuid,
    /// The user the palace belongs to.
    pub owner_id: UserId,
    /// What the user wants to remember.
    pub topic: String,
    /// Where the scene is set.
    pub location: String,
    /// Generated scene, in English.
    pub scene_text: String,
    /// Translated scene, or the empty string when none was stored.
    pub translated_scene_text: String,
    /// Target language of `translated_scene_text`, when one was stored.
    pub translation_language: Option<LanguageCode>,
    /// Creation time, assigned by the server clock.
    pub created_at: DateTime<Utc>,
}

impl PalaceRecord {
    /// Whether a translation was stored alongside the scene.
    #[must_use]
    pub fn has_translation(&self) -> bool {
        !self.translated_scene_text.is_empty()
    }
}

/// Sorts records newest first; ties on `created_at` fall back to the id.
pub fn sort_newest_first(records: &mut [PalaceRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}
