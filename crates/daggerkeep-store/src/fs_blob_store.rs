//! Filesystem implementation of the `BlobStore` trait.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::BlobStore;

/// Stores blobs as files below a root directory. Blob paths are relative,
/// `/`-separated and may not escape the root.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates a store rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(path);
        let well_formed = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !well_formed {
            return Err(DomainError::Validation(format!("invalid blob path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

fn io_error(path: &str, err: &std::io::Error) -> DomainError {
    DomainError::Infrastructure(format!("blob storage error at {path}: {err}"))
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(path, &e))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| io_error(path, &e))?;
        debug!(path, size = bytes.len(), "blob written");
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let target = self.resolve(path)?;
        match tokio::fs::read(&target).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(path, &e)),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), DomainError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(path, &e)),
        }
    }
}
