//! `PostgreSQL` implementation of the `PalaceRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use palace_core::error::DomainError;
use palace_core::language::LanguageCode;
use palace_core::palace::PalaceRecord;
use palace_core::profile::UserId;
use palace_core::repository::PalaceRepository;

use crate::infrastructure;

#[derive(Debug, sqlx::FromRow)]
struct PalaceRow {
    id: Uuid,
    owner_id: String,
    topic: String,
    location: String,
    scene_text: String,
    translated_scene_text: String,
    translation_language: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PalaceRow> for PalaceRecord {
    type Error = DomainError;

    fn try_from(row: PalaceRow) -> Result<Self, Self::Error> {
        let translation_language = row
            .translation_language
            .as_deref()
            .map(str::parse::<LanguageCode>)
            .transpose()
            .map_err(|_| {
                DomainError::Infrastructure(format!(
                    "palace {} has unknown translation language {:?}",
                    row.id, row.translation_language
                ))
            })?;
        Ok(Self {
            id: row.id,
            owner_id: UserId::new(row.owner_id),
            topic: row.topic,
            location: row.location,
            scene_text: row.scene_text,
            translated_scene_text: row.translated_scene_text,
            translation_language,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL-backed palace repository.
#[derive(Debug, Clone)]
pub struct PgPalaceRepository {
    pool: PgPool,
}

impl PgPalaceRepository {
    /// Creates a new `PgPalaceRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PalaceRepository for PgPalaceRepository {
    async fn append(&self, record: &PalaceRecord) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO palaces \
                 (id, owner_id, topic, location, scene_text, \
                  translated_scene_text, translation_language, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(record.id)
        .bind(record.owner_id.as_str())
        .bind(&record.topic)
        .bind(&record.location)
        .bind(&record.scene_text)
        .bind(&record.translated_scene_text)
        .bind(record.translation_language.map(LanguageCode::code))
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| infrastructure("palace append failed", &e))?;

        debug!(palace_id = %record.id, user_id = %record.owner_id, "palace appended");
        Ok(())
    }

    async fn list(&self, owner_id: &UserId) -> Result<Vec<PalaceRecord>, DomainError> {
        let rows: Vec<PalaceRow> = sqlx::query_as(
            "SELECT id, owner_id, topic, location, scene_text, \
                    translated_scene_text, translation_language, created_at \
             FROM palaces \
             WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| infrastructure("palace listing failed", &e))?;

        rows.into_iter().map(PalaceRecord::try_from).collect()
    }
}
