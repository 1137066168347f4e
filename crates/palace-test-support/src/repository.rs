//! Test repositories — in-memory and failing implementations of the
//! profile and palace stores.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use palace_core::error::DomainError;
use palace_core::palace::{PalaceRecord, sort_newest_first};
use palace_core::profile::{ProfileUpdate, UserId, UserProfile};
use palace_core::repository::{PalaceRepository, ProfileRepository};

/// A profile store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl InMemoryProfileRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `profiles`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.profiles.lock().unwrap();
            for profile in profiles {
                map.insert(profile.id.clone(), profile);
            }
        }
        repo
    }

    /// Returns a snapshot of the stored profile for `user_id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn stored(&self, user_id: &UserId) -> Option<UserProfile> {
        self.profiles.lock().unwrap().get(user_id).cloned()
    }

    /// Number of stored profiles.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn len(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    /// Whether no profile has been stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn merge(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| DomainError::NotFound(format!("profile {user_id}")))?;
        profile.apply(update);
        Ok(profile.clone())
    }
}

/// A profile store whose every call fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingProfileRepository;

#[async_trait]
impl ProfileRepository for FailingProfileRepository {
    async fn get(&self, _user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn create(&self, _profile: &UserProfile) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn merge(
        &self,
        _user_id: &UserId,
        _update: &ProfileUpdate,
    ) -> Result<UserProfile, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// A palace store backed by a `Vec`, recording appends in call order.
#[derive(Debug, Default)]
pub struct InMemoryPalaceRepository {
    records: Mutex<Vec<PalaceRecord>>,
}

impl InMemoryPalaceRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `records`.
    #[must_use]
    pub fn with_records(records: Vec<PalaceRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Returns every appended record in append order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended(&self) -> Vec<PalaceRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl PalaceRepository for InMemoryPalaceRepository {
    async fn append(&self, record: &PalaceRecord) -> Result<(), DomainError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list(&self, owner_id: &UserId) -> Result<Vec<PalaceRecord>, DomainError> {
        let mut owned: Vec<PalaceRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| &record.owner_id == owner_id)
            .cloned()
            .collect();
        sort_newest_first(&mut owned);
        Ok(owned)
    }
}

/// A palace store whose every call fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingPalaceRepository;

#[async_trait]
impl PalaceRepository for FailingPalaceRepository {
    async fn append(&self, _record: &PalaceRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list(&self, _owner_id: &UserId) -> Result<Vec<PalaceRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
