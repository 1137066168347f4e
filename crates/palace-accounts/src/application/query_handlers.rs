//! Query handlers for the accounts context.
//!
//! This module returns read-only view DTOs of the signed-in user's profile.

use palace_core::error::DomainError;
use palace_core::profile::{Profession, UserId, UserProfile};
use palace_core::repository::ProfileRepository;
use palace_core::session::SessionUser;
use serde::Serialize;

/// Read-only view of a user's profile.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProfileView {
    /// The provider-issued user identifier.
    pub user_id: UserId,
    /// Email captured at sign-up.
    pub email: String,
    /// Full name.
    pub display_name: String,
    /// Handle without the leading `@`.
    pub username: String,
    /// Student, Professional or Other; absent if never set.
    pub profession: Option<Profession>,
    /// "About me" text.
    pub biography: String,
    /// Avatar image reference, absent if never set.
    pub avatar_ref: Option<String>,
    /// Whether the stored document exists. `false` means the view was
    /// filled from the session alone.
    pub stored: bool,
}

impl ProfileView {
    fn from_session(user: &SessionUser) -> Self {
        Self {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            username: user.username.clone(),
            profession: user.profession,
            biography: user.biography.clone(),
            avatar_ref: user.avatar_ref.clone(),
            stored: false,
        }
    }
}

impl From<UserProfile> for ProfileView {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.id,
            email: profile.email,
            display_name: profile.display_name,
            username: profile.username,
            profession: Some(profile.profession),
            biography: profile.biography,
            avatar_ref: Some(profile.avatar_ref),
            stored: true,
        }
    }
}

/// Loads the profile of the signed-in user. Missing documents fall back to
/// what the session already knows.
///
/// # Errors
///
/// Returns the store's error if the read fails.
pub async fn get_profile(
    user: &SessionUser,
    profiles: &dyn ProfileRepository,
) -> Result<ProfileView, DomainError> {
    Ok(profiles
        .get(&user.user_id)
        .await?
        .map_or_else(|| ProfileView::from_session(user), ProfileView::from))
}

#[cfg(test)]
mod tests {
    use palace_core::error::DomainError;
    use palace_core::gateway::Credential;
    use palace_core::profile::{Profession, UserId, UserProfile};
    use palace_core::session::SessionUser;

    use crate::application::query_handlers::get_profile;
    use palace_test_support::{FailingProfileRepository, InMemoryProfileRepository};

    fn session_user() -> SessionUser {
        SessionUser::from_credential(
            Credential {
                user_id: UserId::new("uid-3"),
                email: "lin@example.com".into(),
                display_name: Some("Lin".into()),
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_get_profile_returns_stored_document() {
        // Arrange
        let profiles = InMemoryProfileRepository::with_profiles([UserProfile {
            id: UserId::new("uid-3"),
            email: "lin@example.com".into(),
            username: "lin".into(),
            display_name: "Lin Chen".into(),
            profession: Profession::Other,
            biography: "Cartographer.".into(),
            avatar_ref: "https://api.dicebear.com/7.x/adventurer/svg?seed=Wolf".into(),
        }]);

        // Act
        let view = get_profile(&session_user(), &profiles).await.unwrap();

        // Assert
        assert!(view.stored);
        assert_eq!(view.display_name, "Lin Chen");
        assert_eq!(view.profession, Some(Profession::Other));
        assert_eq!(view.biography, "Cartographer.");
    }

    #[tokio::test]
    async fn test_get_profile_falls_back_to_session_when_missing() {
        let profiles = InMemoryProfileRepository::new();

        let view = get_profile(&session_user(), &profiles).await.unwrap();

        assert!(!view.stored);
        assert_eq!(view.email, "lin@example.com");
        assert_eq!(view.display_name, "Lin");
        assert_eq!(view.profession, None);
        assert_eq!(view.avatar_ref, None);
    }

    #[tokio::test]
    async fn test_get_profile_propagates_store_failure() {
        let result = get_profile(&session_user(), &FailingProfileRepository).await;

        match result.unwrap_err() {
            DomainError::Infrastructure(_) => {}
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }
}
