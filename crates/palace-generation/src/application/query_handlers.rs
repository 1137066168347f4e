//! Query handlers for the generation context.
//!
//! This module returns the signed-in user's palace history as a read-only
//! view DTO.

use palace_core::error::DomainError;
use palace_core::palace::PalaceRecord;
use palace_core::profile::UserId;
use palace_core::repository::PalaceRepository;
use serde::Serialize;

/// Read-only view of a user's palace history.
#[derive(Debug, Serialize)]
pub struct PalaceHistoryView {
    /// Number of palaces the user has generated.
    pub total: usize,
    /// The palaces, newest first.
    pub palaces: Vec<PalaceRecord>,
}

/// Lists the palaces owned by `owner_id`, newest first.
///
/// # Errors
///
/// Returns the store's error if the read fails.
pub async fn list_palaces(
    owner_id: &UserId,
    repo: &dyn PalaceRepository,
) -> Result<PalaceHistoryView, DomainError> {
    let palaces = repo.list(owner_id).await?;
    Ok(PalaceHistoryView {
        total: palaces.len(),
        palaces,
    })
}
