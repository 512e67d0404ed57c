//! Collaborators the generation orchestrator drives.

use async_trait::async_trait;
use daggerkeep_campaign::domain::records::{Encounter, Location, LoreEntry, Npc, TimelineEvent};
use daggerkeep_core::error::DomainError;

use super::credentials::Provider;

/// Sends a prompt to an AI provider and returns its text reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply to `prompt` with `provider`, authenticating with
    /// `api_key`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Generation` if the provider cannot be reached,
    /// rejects the request, or replies without text.
    async fn generate(
        &self,
        provider: Provider,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, DomainError>;
}

/// Receives human-readable progress text.
pub trait ProgressReporter: Send + Sync {
    /// Report one progress message.
    fn report(&self, message: &str);
}

/// Saves generated records into the campaign's collections.
#[async_trait]
pub trait ContentSink: Send + Sync {
    /// Save an NPC.
    async fn add_npc(&self, npc: Npc) -> Result<(), DomainError>;

    /// Save a location.
    async fn add_location(&self, location: Location) -> Result<(), DomainError>;

    /// Save a lore entry.
    async fn add_lore(&self, lore: LoreEntry) -> Result<(), DomainError>;

    /// Save an encounter.
    async fn add_encounter(&self, encounter: Encounter) -> Result<(), DomainError>;

    /// Save a timeline event.
    async fn add_timeline_event(&self, event: TimelineEvent) -> Result<(), DomainError>;
}
