//! Test stores — in-memory and failing key-value and blob stores.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::{BlobStore, KeyValueStore};

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl InMemoryKeyValueStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the value under `key`, bypassing the async trait.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn snapshot(&self, key: &str) -> Option<serde_json::Value> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DomainError> {
        self.values.lock().unwrap().insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A key-value store whose reads succeed (always empty) and whose writes
/// always fail with an infrastructure error.
#[derive(Debug)]
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk full".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk full".into()))
    }
}

/// An in-memory key-value store whose `remove` always fails. Reads and
/// writes behave like `InMemoryKeyValueStore`.
#[derive(Debug, Default)]
pub struct RemoveFailsKeyValueStore {
    inner: InMemoryKeyValueStore,
}

impl RemoveFailsKeyValueStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the value under `key`.
    pub fn snapshot(&self, key: &str) -> Option<serde_json::Value> {
        self.inner.snapshot(key)
    }
}

#[async_trait]
impl KeyValueStore for RemoveFailsKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DomainError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("permission denied".into()))
    }
}

/// In-memory blob store.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths currently stored, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.blobs.lock().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        self.blobs
            .lock()
            .unwrap()
            .insert(path.to_owned(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.blobs.lock().unwrap().get(path).cloned())
    }

    async fn delete(&self, path: &str) -> Result<(), DomainError> {
        self.blobs.lock().unwrap().remove(path);
        Ok(())
    }
}

/// An in-memory blob store whose `delete` always fails. Writes and reads
/// behave like `InMemoryBlobStore`.
#[derive(Debug, Default)]
pub struct DeleteFailsBlobStore {
    inner: InMemoryBlobStore,
}

impl DeleteFailsBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths currently stored, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.inner.paths()
    }
}

#[async_trait]
impl BlobStore for DeleteFailsBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        self.inner.put(path, bytes).await
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError> {
        self.inner.get(path).await
    }

    async fn delete(&self, _path: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("permission denied".into()))
    }
}
