//! `PostgreSQL` implementation of the `KeyValueStore` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::KeyValueStore;

use crate::database_error;

/// PostgreSQL-backed key-value store. Each key holds one JSON document.
#[derive(Debug, Clone)]
pub struct PgKeyValueStore {
    pool: PgPool,
}

impl PgKeyValueStore {
    /// Creates a new `PgKeyValueStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for PgKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT value FROM key_values WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| database_error(&e))?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO key_values (key, value, updated_at) VALUES ($1, $2, NOW()) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&e))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM key_values WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error(&e))?;
        Ok(())
    }
}
