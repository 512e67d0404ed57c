//! Daggerkeep storage — PostgreSQL and filesystem implementations of the
//! persistence collaborator traits defined in `daggerkeep-core`.

pub mod fs_blob_store;
pub mod pg_key_value_store;
pub mod pg_record_repository;

use daggerkeep_core::error::DomainError;

/// Maps a database error into the domain error taxonomy.
pub(crate) fn database_error(err: &sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("database error: {err}"))
}
