//! Palace Store — `PostgreSQL` implementations of the profile and palace
//! repositories.

pub mod pg_palace_repository;
pub mod pg_profile_repository;

use palace_core::error::DomainError;

fn infrastructure(context: &str, error: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("{context}: {error}"))
}
