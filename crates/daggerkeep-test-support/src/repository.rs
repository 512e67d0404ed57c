//! Test repositories — `RecordRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::record::{Collection, StoredRecord};
use daggerkeep_core::repository::RecordRepository;
use uuid::Uuid;

/// A fully working in-memory record repository. Keeps records in insertion
/// order and remembers every successful insert so tests can assert on call
/// order across collections.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    records: Mutex<Vec<StoredRecord>>,
    inserted: Mutex<Vec<StoredRecord>>,
}

impl InMemoryRecordRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `records`.
    #[must_use]
    pub fn with_records(records: Vec<StoredRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            inserted: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every record inserted through `insert`, in call
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn inserted(&self) -> Vec<StoredRecord> {
        self.inserted.lock().unwrap().clone()
    }

    /// Returns the collections of every inserted record, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn inserted_collections(&self) -> Vec<Collection> {
        self.inserted
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.collection)
            .collect()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn insert(&self, record: &StoredRecord) -> Result<(), DomainError> {
        self.records.lock().unwrap().push(record.clone());
        self.inserted.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &StoredRecord) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|r| {
                r.id == record.id
                    && r.campaign_id == record.campaign_id
                    && r.collection == record.collection
            })
            .ok_or(DomainError::RecordNotFound(record.id))?;
        existing.fields = record.fields.clone();
        existing.updated_at = record.updated_at;
        Ok(())
    }

    async fn delete(
        &self,
        campaign_id: Uuid,
        collection: Collection,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.id == id && r.campaign_id == campaign_id && r.collection == collection));
        if records.len() == before {
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
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.campaign_id == campaign_id && r.collection == collection)
            .cloned())
    }

    async fn list(
        &self,
        campaign_id: Uuid,
        collection: Collection,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.campaign_id == campaign_id && r.collection == collection)
            .cloned()
            .collect())
    }
}

/// A record repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingRecordRepository;

#[async_trait]
impl RecordRepository for FailingRecordRepository {
    async fn insert(&self, _record: &StoredRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn update(&self, _record: &StoredRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(
        &self,
        _campaign_id: Uuid,
        _collection: Collection,
        _id: Uuid,
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load(
        &self,
        _campaign_id: Uuid,
        _collection: Collection,
        _id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list(
        &self,
        _campaign_id: Uuid,
        _collection: Collection,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// An in-memory repository whose `insert` fails on the n-th call (1-based)
/// and on every later call. Every other operation behaves like
/// `InMemoryRecordRepository`.
#[derive(Debug)]
pub struct FailOnInsertRecordRepository {
    inner: InMemoryRecordRepository,
    fail_on: usize,
    attempts: Mutex<usize>,
}

impl FailOnInsertRecordRepository {
    /// Create a repository that fails the `fail_on`-th insert.
    #[must_use]
    pub fn new(fail_on: usize) -> Self {
        Self {
            inner: InMemoryRecordRepository::new(),
            fail_on,
            attempts: Mutex::new(0),
        }
    }

    /// Records that were successfully inserted before the failure.
    pub fn inserted(&self) -> Vec<StoredRecord> {
        self.inner.inserted()
    }

    /// Number of insert calls received, including failed ones.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert_attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl RecordRepository for FailOnInsertRecordRepository {
    async fn insert(&self, record: &StoredRecord) -> Result<(), DomainError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if attempt >= self.fail_on {
            return Err(DomainError::Infrastructure(format!(
                "insert {attempt} rejected"
            )));
        }
        self.inner.insert(record).await
    }

    async fn update(&self, record: &StoredRecord) -> Result<(), DomainError> {
        self.inner.update(record).await
    }

    async fn delete(
        &self,
        campaign_id: Uuid,
        collection: Collection,
        id: Uuid,
    ) -> Result<(), DomainError> {
        self.inner.delete(campaign_id, collection, id).await
    }

    async fn load(
        &self,
        campaign_id: Uuid,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredRecord>, DomainError> {
        self.inner.load(campaign_id, collection, id).await
    }

    async fn list(
        &self,
        campaign_id: Uuid,
        collection: Collection,
    ) -> Result<Vec<StoredRecord>, DomainError> {
        self.inner.list(campaign_id, collection).await
    }
}
