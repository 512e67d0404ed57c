//! `PostgreSQL` implementation of the `RecordRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use daggerkeep_core::error::DomainError;
use daggerkeep_core::record::{Collection, StoredRecord};
use daggerkeep_core::repository::RecordRepository;

use crate::database_error;

type RecordRow = (Uuid, Uuid, String, serde_json::Value, DateTime<Utc>, DateTime<Utc>);

const SELECT_COLUMNS: &str =
    "SELECT id, campaign_id, collection, fields, created_at, updated_at FROM campaign_records";

fn from_row(row: RecordRow) -> Result<StoredRecord, DomainError> {
    let (id, campaign_id, collection, fields, created_at, updated_at) = row;
    Ok(StoredRecord {
        id,
        campaign_id,
        collection: collection.parse()?,
        fields,
        created_at,
        updated_at,
    })
}

/// PostgreSQL-backed record repository.
#[derive(Debug, Clone)]
pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    /// Creates a new `PgRecordRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn insert(&self, record: &StoredRecord) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO campaign_records \
             (id, campaign_id, collection, fields, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id)
        .bind(record.campaign_id)
        .bind(record.collection.as_str())
        .bind(&record.fields)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&e))?;

        debug!(record_id = %record.id, collection = %record.collection, "record inserted");
        Ok(())
    }

    async fn update(&self, record: &StoredRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE campaign_records SET fields = $1, updated_at = $2 \
             WHERE id = $3 AND campaign_id = $4 AND collection = $5",
        )
        .bind(&record.fields)
        .bind(record.updated_at)
        .bind(record.id)
        .bind(record.campaign_id)
        .bind(record.collection.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecordNotFound(record.id));
        }
        Ok(())
    }

    async fn delete(
        &self,
        campaign_id: Uuid,
        collection: Collection,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "DELETE FROM campaign_records WHERE id = $1 AND campaign_id = $2 AND collection = $3",
        )
        .bind(id)
        .bind(campaign_id)
        .bind(collection.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error(&e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecordNotFound(id));
        }
        Ok(())
    }

    async fn load(
        &self,
        campaign_id: Uuid,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError> {
        let row: Option<RecordRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE id = $1 AND campaign_id = $2 AND collection = $3"
        ))
        .bind(id)
        .bind(campaign_id)
        .bind(collection.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error(&e))?;

        row.map(from_row).transpose()
    }

    async fn list(
        &self,
        campaign_id: Uuid,
        collection: Collection,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        let rows: Vec<RecordRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE campaign_id = $1 AND collection = $2 ORDER BY created_at, id"
        ))
        .bind(campaign_id)
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error(&e))?;

        rows.into_iter().map(from_row).collect()
    }
}
