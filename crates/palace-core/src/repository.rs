//! Persistence ports for profiles and palaces.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::palace::PalaceRecord;
use crate::profile::{ProfileUpdate, UserId, UserProfile};

/// Profile documents keyed by user ID.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads a profile, or `None` if the user never had one written.
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Writes a complete profile, replacing any existing document.
    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError>;

    /// Merge-writes the fields present in `update` and returns the stored
    /// result.
    ///
    /// Returns `DomainError::NotFound` if no profile exists for `user_id`.
    async fn merge(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, DomainError>;
}

/// Append-only per-user palace collections.
#[async_trait]
pub trait PalaceRepository: Send + Sync {
    /// Appends a record to its owner's collection.
    async fn append(&self, record: &PalaceRecord) -> Result<(), DomainError>;

    /// Lists a user's palaces, newest first.
    async fn list(&self, owner_id: &UserId) -> Result<Vec<PalaceRecord>, DomainError>;
}
