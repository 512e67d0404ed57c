//! Persistence collaborator abstractions.
//!
//! Three shapes of storage back the application: per-campaign record
//! collections addressed by id, a whole-value key-value store for singleton
//! state (campaign metadata, wizard drafts, frames, credentials, dice
//! history), and a blob store keyed by path for uploaded files.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::record::{Collection, StoredRecord};

/// Repository trait for campaign record collections.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, record: &StoredRecord) -> Result<(), DomainError>;

    /// Replace the fields and `updated_at` of an existing record.
    ///
    /// Returns `DomainError::RecordNotFound` if no such record exists.
    async fn update(&self, record: &StoredRecord) -> Result<(), DomainError>;

    /// Delete a record by id.
    ///
    /// Returns `DomainError::RecordNotFound` if no such record exists.
    async fn delete(
        &self,
        campaign_id: Uuid,
        collection: Collection,
        id: Uuid,
    ) -> Result<(), DomainError>;

    /// Load a single record.
    async fn load(
        &self,
        campaign_id: Uuid,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError>;

    /// List every record of a collection, oldest first.
    async fn list(
        &self,
        campaign_id: Uuid,
        collection: Collection,
    ) -> Result<Vec<StoredRecord>, DomainError>;
}

/// Whole-value key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DomainError>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}

/// Blob store keyed by path.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` at `path`, replacing any existing blob.
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError>;

    /// Read the blob at `path`.
    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Delete the blob at `path`. Deleting an absent blob succeeds.
    async fn delete(&self, path: &str) -> Result<(), DomainError>;
}
