//! Command handlers for the accounts context.
//!
//! Each handler validates locally, calls the identity provider and/or the
//! profile store, and hands back what the session needs to remember.

use palace_core::command::Command;
use palace_core::error::DomainError;
use palace_core::gateway::IdentityGateway;
use palace_core::profile::{Profession, UserProfile};
use palace_core::repository::ProfileRepository;
use palace_core::session::SessionUser;
use tracing::{error, info, warn};

use crate::domain::commands::{SignIn, SignUp, UpdateProfile};
use crate::domain::validation::{has_required_sign_up_fields, is_valid_email};

/// Handles `SignUp`: validates the form, creates the provider account, then
/// writes the initial profile.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed email or blank name or
/// username, before the provider is contacted. Any later failure is
/// `DomainError::SignUpFailed`.
pub async fn handle_sign_up(
    command: &SignUp,
    identity: &dyn IdentityGateway,
    profiles: &dyn ProfileRepository,
) -> Result<SessionUser, DomainError> {
    let email = command.email.trim();
    if !has_required_sign_up_fields(email, &command.display_name, &command.username) {
        return Err(DomainError::Validation(
            "A valid email, full name and username are required.".into(),
        ));
    }

    let credential = identity
        .sign_up(email, &command.password)
        .await
        .map_err(|e| {
            warn!(
                command = command.command_type(),
                correlation_id = %command.correlation_id(),
                error = %e,
                "identity provider rejected sign-up"
            );
            DomainError::SignUpFailed
        })?;

    let profile = UserProfile {
        id: credential.user_id.clone(),
        email: email.to_owned(),
        username: command.username.trim().to_owned(),
        display_name: command.display_name.trim().to_owned(),
        profession: command.profession,
        biography: String::new(),
        avatar_ref: command.avatar.url(),
    };

    profiles.create(&profile).await.map_err(|e| {
        error!(
            command = command.command_type(),
            correlation_id = %command.correlation_id(),
            user_id = %profile.id,
            error = %e,
            "account created but initial profile write failed"
        );
        DomainError::SignUpFailed
    })?;

    info!(user_id = %profile.id, "account created");

    Ok(SessionUser::from_credential(credential, Some(&profile)))
}

/// Handles `SignIn`: authenticates with the provider and merges the stored
/// profile, if any, into the session user.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed email. Every other
/// failure is `DomainError::AuthenticationFailed`.
pub async fn handle_sign_in(
    command: &SignIn,
    identity: &dyn IdentityGateway,
    profiles: &dyn ProfileRepository,
) -> Result<SessionUser, DomainError> {
    let email = command.email.trim();
    if !is_valid_email(email) {
        return Err(DomainError::Validation("Invalid email format".into()));
    }

    let credential = identity
        .sign_in(email, &command.password)
        .await
        .map_err(|e| {
            warn!(
                command = command.command_type(),
                correlation_id = %command.correlation_id(),
                error = %e,
                "sign-in rejected"
            );
            DomainError::AuthenticationFailed
        })?;

    let profile = profiles.get(&credential.user_id).await.map_err(|e| {
        error!(
            correlation_id = %command.correlation_id(),
            user_id = %credential.user_id,
            error = %e,
            "profile lookup failed during sign-in"
        );
        DomainError::AuthenticationFailed
    })?;

    info!(user_id = %credential.user_id, has_profile = profile.is_some(), "signed in");

    Ok(SessionUser::from_credential(credential, profile.as_ref()))
}

/// Handles `UpdateProfile`: merge-writes the changed fields. A user without a
/// profile document gets one created from the update.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an over-long biography, or the
/// store's error if the write fails.
pub async fn handle_update_profile(
    command: &UpdateProfile,
    profiles: &dyn ProfileRepository,
) -> Result<UserProfile, DomainError> {
    command.update.validate()?;

    match profiles.merge(&command.user_id, &command.update).await {
        Ok(profile) => {
            info!(
                command = command.command_type(),
                user_id = command.actor(),
                "profile updated"
            );
            Ok(profile)
        }
        Err(DomainError::NotFound(_)) => {
            let mut profile = UserProfile {
                id: command.user_id.clone(),
                email: command.email.clone(),
                username: String::new(),
                display_name: String::new(),
                profession: Profession::default(),
                biography: String::new(),
                avatar_ref: String::new(),
            };
            profile.apply(&command.update);
            profiles.create(&profile).await?;
            info!(
                command = command.command_type(),
                user_id = command.actor(),
                "profile created on first save"
            );
            Ok(profile)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use palace_core::catalog::AvatarPreset;
    use palace_core::error::DomainError;
    use palace_core::profile::{Profession, ProfileUpdate, UserId, UserProfile};
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_sign_in, handle_sign_up, handle_update_profile,
    };
    use crate::domain::commands::{SignIn, SignUp, UpdateProfile};
    use palace_test_support::{
        FailingProfileRepository, InMemoryProfileRepository, StubIdentityGateway,
    };

    fn sign_up_command(email: &str) -> SignUp {
        SignUp {
            correlation_id: Uuid::new_v4(),
            email: email.to_owned(),
            password: "correct horse".to_owned(),
            display_name: "Ada Lovelace".to_owned(),
            username: "ada".to_owned(),
            profession: Profession::Student,
            avatar: AvatarPreset::Fox,
        }
    }

    fn sign_in_command(email: &str, password: &str) -> SignIn {
        SignIn {
            correlation_id: Uuid::new_v4(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_rejects_malformed_email_before_calling_provider() {
        // Arrange
        let identity = StubIdentityGateway::new();
        let profiles = InMemoryProfileRepository::new();

        // Act
        let result = handle_sign_up(&sign_up_command("not-an-email"), &identity, &profiles).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(identity.sign_up_calls(), 0);
        assert!(profiles.is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_rejects_blank_username() {
        let identity = StubIdentityGateway::new();
        let profiles = InMemoryProfileRepository::new();
        let mut command = sign_up_command("ada@example.com");
        command.username = "   ".into();

        let result = handle_sign_up(&command, &identity, &profiles).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(identity.sign_up_calls(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_writes_initial_profile() {
        // Arrange
        let identity = StubIdentityGateway::new();
        let profiles = InMemoryProfileRepository::new();

        // Act
        let user = handle_sign_up(&sign_up_command("ada@example.com"), &identity, &profiles)
            .await
            .unwrap();

        // Assert
        let stored = profiles.stored(&user.user_id).unwrap();
        assert_eq!(stored.email, "ada@example.com");
        assert_eq!(stored.username, "ada");
        assert_eq!(stored.display_name, "Ada Lovelace");
        assert_eq!(stored.profession, Profession::Student);
        assert_eq!(stored.biography, "");
        assert_eq!(stored.avatar_ref, AvatarPreset::Fox.url());
        assert_eq!(user.greeting_name(), "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_is_generic_failure() {
        let identity = StubIdentityGateway::new();
        identity.register("ada@example.com", "whatever");
        let profiles = InMemoryProfileRepository::new();

        let result = handle_sign_up(&sign_up_command("ada@example.com"), &identity, &profiles).await;

        assert!(matches!(result, Err(DomainError::SignUpFailed)));
        assert!(profiles.is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_profile_write_failure_is_generic_failure() {
        let identity = StubIdentityGateway::new();

        let result = handle_sign_up(
            &sign_up_command("ada@example.com"),
            &identity,
            &FailingProfileRepository,
        )
        .await;

        assert!(matches!(result, Err(DomainError::SignUpFailed)));
    }

    #[tokio::test]
    async fn test_sign_in_merges_existing_profile() {
        // Arrange
        let identity = StubIdentityGateway::new();
        let credential = identity.register("grace@example.com", "cobol");
        let profiles = InMemoryProfileRepository::with_profiles([UserProfile {
            id: credential.user_id.clone(),
            email: "grace@example.com".into(),
            username: "amazing_grace".into(),
            display_name: "Grace Hopper".into(),
            profession: Profession::Professional,
            biography: "Compilers.".into(),
            avatar_ref: AvatarPreset::Cat.url(),
        }]);

        // Act
        let user = handle_sign_in(
            &sign_in_command("  grace@example.com ", "cobol"),
            &identity,
            &profiles,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(user.user_id, credential.user_id);
        assert_eq!(user.username, "amazing_grace");
        assert_eq!(user.profession, Some(Profession::Professional));
    }

    #[tokio::test]
    async fn test_sign_in_failures_are_indistinguishable() {
        let identity = StubIdentityGateway::new();
        identity.register("grace@example.com", "cobol");
        let profiles = InMemoryProfileRepository::new();

        let wrong_password =
            handle_sign_in(&sign_in_command("grace@example.com", "fortran"), &identity, &profiles)
                .await
                .unwrap_err();
        let unknown_account =
            handle_sign_in(&sign_in_command("nobody@example.com", "cobol"), &identity, &profiles)
                .await
                .unwrap_err();
        let outage = handle_sign_in(
            &sign_in_command("grace@example.com", "cobol"),
            &StubIdentityGateway::unavailable(),
            &profiles,
        )
        .await
        .unwrap_err();

        for err in [&wrong_password, &unknown_account, &outage] {
            assert!(matches!(err, DomainError::AuthenticationFailed));
            assert_eq!(err.to_string(), "invalid email or password");
        }
    }

    #[tokio::test]
    async fn test_sign_in_rejects_malformed_email_before_calling_provider() {
        let identity = StubIdentityGateway::new();
        let profiles = InMemoryProfileRepository::new();

        let result = handle_sign_in(&sign_in_command("grace", "cobol"), &identity, &profiles).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(identity.sign_in_calls(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_profile_store_failure_is_authentication_failure() {
        let identity = StubIdentityGateway::new();
        identity.register("grace@example.com", "cobol");

        let result = handle_sign_in(
            &sign_in_command("grace@example.com", "cobol"),
            &identity,
            &FailingProfileRepository,
        )
        .await;

        assert!(matches!(result, Err(DomainError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_update_profile_merges_changed_fields() {
        // Arrange
        let user_id = UserId::new("uid-1");
        let profiles = InMemoryProfileRepository::with_profiles([UserProfile {
            id: user_id.clone(),
            email: "ada@example.com".into(),
            username: "ada".into(),
            display_name: "Ada".into(),
            profession: Profession::Student,
            biography: String::new(),
            avatar_ref: AvatarPreset::Lion.url(),
        }]);
        let command = UpdateProfile {
            correlation_id: Uuid::new_v4(),
            user_id: user_id.clone(),
            email: "ada@example.com".into(),
            update: ProfileUpdate {
                biography: Some("Poetical science.".into()),
                avatar_ref: Some(AvatarPreset::Dragon.url()),
                ..ProfileUpdate::default()
            },
        };

        // Act
        let updated = handle_update_profile(&command, &profiles).await.unwrap();

        // Assert
        assert_eq!(updated.biography, "Poetical science.");
        assert_eq!(updated.avatar_ref, AvatarPreset::Dragon.url());
        assert_eq!(updated.username, "ada");
        assert_eq!(profiles.stored(&user_id).unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_long_biography() {
        let user_id = UserId::new("uid-1");
        let profiles = InMemoryProfileRepository::new();
        let command = UpdateProfile {
            correlation_id: Uuid::new_v4(),
            user_id: user_id.clone(),
            email: "ada@example.com".into(),
            update: ProfileUpdate {
                biography: Some("x".repeat(301)),
                ..ProfileUpdate::default()
            },
        };

        let result = handle_update_profile(&command, &profiles).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(profiles.stored(&user_id).is_none());
    }

    #[tokio::test]
    async fn test_update_profile_creates_missing_document() {
        let user_id = UserId::new("uid-9");
        let profiles = InMemoryProfileRepository::new();
        let command = UpdateProfile {
            correlation_id: Uuid::new_v4(),
            user_id: user_id.clone(),
            email: "new@example.com".into(),
            update: ProfileUpdate {
                username: Some("newbie".into()),
                ..ProfileUpdate::default()
            },
        };

        let created = handle_update_profile(&command, &profiles).await.unwrap();

        assert_eq!(created.email, "new@example.com");
        assert_eq!(created.username, "newbie");
        assert_eq!(profiles.stored(&user_id).unwrap(), created);
    }
}
