//! Shared application state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use daggerkeep_core::clock::Clock;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::{BlobStore, KeyValueStore, RecordRepository};
use daggerkeep_core::rng::DeterministicRng;
use daggerkeep_generation::domain::ports::TextGenerator;
use daggerkeep_wizard::application::query_handlers::load_progress;
use daggerkeep_wizard::domain::progress::WizardProgress;
use uuid::Uuid;

/// A wizard held in memory for one campaign.
pub type WizardSession = Arc<tokio::sync::Mutex<WizardProgress>>;

/// In-memory wizards, one per campaign, restored from storage on first use.
///
/// Each wizard sits behind its own async mutex, so edits to one campaign
/// serialize while other campaigns proceed.
#[derive(Debug, Clone, Default)]
pub struct WizardSessions {
    sessions: Arc<Mutex<HashMap<Uuid, WizardSession>>>,
}

impl WizardSessions {
    fn cached(&self, campaign_id: Uuid) -> Result<Option<WizardSession>, DomainError> {
        let sessions = self.sessions.lock().map_err(|e| {
            DomainError::Infrastructure(format!("wizard sessions mutex poisoned: {e}"))
        })?;
        Ok(sessions.get(&campaign_id).cloned())
    }

    /// Returns the campaign's wizard, loading it from `store` the first time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if loading fails.
    pub async fn open(
        &self,
        campaign_id: Uuid,
        store: &dyn KeyValueStore,
    ) -> Result<WizardSession, DomainError> {
        if let Some(session) = self.cached(campaign_id)? {
            return Ok(session);
        }

        let progress = load_progress(campaign_id, store).await?;
        let mut sessions = self.sessions.lock().map_err(|e| {
            DomainError::Infrastructure(format!("wizard sessions mutex poisoned: {e}"))
        })?;
        // Another request may have loaded it while this one was reading.
        let session = sessions
            .entry(campaign_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(progress)));
        Ok(Arc::clone(session))
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// RNG for dice rolls.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Campaign record collections.
    pub records: Arc<dyn RecordRepository>,
    /// Campaign metadata, wizard drafts and frames, dice history and API keys.
    pub store: Arc<dyn KeyValueStore>,
    /// Uploaded file contents.
    pub blobs: Arc<dyn BlobStore>,
    /// AI provider client.
    pub generator: Arc<dyn TextGenerator>,
    /// In-memory wizards.
    pub wizards: WizardSessions,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        records: Arc<dyn RecordRepository>,
        store: Arc<dyn KeyValueStore>,
        blobs: Arc<dyn BlobStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            clock,
            rng,
            records,
            store,
            blobs,
            generator,
            wizards: WizardSessions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use daggerkeep_test_support::InMemoryKeyValueStore;
    use daggerkeep_wizard::domain::frame::{FieldValue, FrameField};

    use super::*;

    #[tokio::test]
    async fn test_open_returns_same_session_for_campaign() {
        // Arrange
        let sessions = WizardSessions::default();
        let store = InMemoryKeyValueStore::new();
        let campaign_id = Uuid::new_v4();

        // Act
        let first = sessions.open(campaign_id, &store).await.unwrap();
        first
            .lock()
            .await
            .update_data(FrameField::Pitch, FieldValue::Text("Skyfall".to_owned()))
            .unwrap();
        let second = sessions.open(campaign_id, &store).await.unwrap();

        // Assert
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.data().pitch, "Skyfall");
    }

    #[tokio::test]
    async fn test_campaigns_get_separate_sessions() {
        let sessions = WizardSessions::default();
        let store = InMemoryKeyValueStore::new();

        let a = sessions.open(Uuid::new_v4(), &store).await.unwrap();
        let b = sessions.open(Uuid::new_v4(), &store).await.unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
    }
}
