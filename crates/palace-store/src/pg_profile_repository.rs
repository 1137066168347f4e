//! `PostgreSQL` implementation of the `ProfileRepository` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use palace_core::error::DomainError;
use palace_core::profile::{Profession, ProfileUpdate, UserId, UserProfile};
use palace_core::repository::ProfileRepository;

use crate::infrastructure;

const PROFILE_COLUMNS: &str =
    "id, email, username, display_name, profession, biography, avatar_ref";

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: String,
    email: String,
    username: String,
    display_name: String,
    profession: String,
    biography: String,
    avatar_ref: String,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let profession = row.profession.parse().map_err(|_| {
            DomainError::Infrastructure(format!(
                "profile {} has unknown profession {:?}",
                row.id, row.profession
            ))
        })?;
        Ok(Self {
            id: UserId::new(row.id),
            email: row.email,
            username: row.username,
            display_name: row.display_name,
            profession,
            biography: row.biography,
            avatar_ref: row.avatar_ref,
        })
    }
}

/// PostgreSQL-backed profile repository.
#[derive(Debug, Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Creates a new `PgProfileRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE id = $1"
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infrastructure("profile lookup failed", &e))?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO user_profiles \
                 (id, email, username, display_name, profession, biography, avatar_ref) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
                 email = EXCLUDED.email, \
                 username = EXCLUDED.username, \
                 display_name = EXCLUDED.display_name, \
                 profession = EXCLUDED.profession, \
                 biography = EXCLUDED.biography, \
                 avatar_ref = EXCLUDED.avatar_ref, \
                 updated_at = NOW()",
        )
        .bind(profile.id.as_str())
        .bind(&profile.email)
        .bind(&profile.username)
        .bind(&profile.display_name)
        .bind(profile.profession.as_str())
        .bind(&profile.biography)
        .bind(&profile.avatar_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| infrastructure("profile write failed", &e))?;

        debug!(user_id = %profile.id, "profile written");
        Ok(())
    }

    async fn merge(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "UPDATE user_profiles SET \
                 display_name = COALESCE($2, display_name), \
                 username = COALESCE($3, username), \
                 profession = COALESCE($4, profession), \
                 biography = COALESCE($5, biography), \
                 avatar_ref = COALESCE($6, avatar_ref), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id.as_str())
        .bind(update.display_name.as_deref())
        .bind(update.username.as_deref())
        .bind(update.profession.map(Profession::as_str))
        .bind(update.biography.as_deref())
        .bind(update.avatar_ref.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| infrastructure("profile merge failed", &e))?;

        let row = row.ok_or_else(|| DomainError::NotFound(format!("profile {user_id}")))?;
        debug!(user_id = %user_id, "profile merged");
        UserProfile::try_from(row)
    }
}
