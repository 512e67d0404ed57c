//! Content sink that saves into the campaign collections.

use async_trait::async_trait;
use daggerkeep_campaign::application::command_handlers::handle_add_record;
use daggerkeep_campaign::domain::commands::AddRecord;
use daggerkeep_campaign::domain::records::{
    CampaignRecord, Encounter, Location, LoreEntry, Npc, TimelineEvent,
};
use daggerkeep_core::clock::Clock;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::RecordRepository;
use uuid::Uuid;

use crate::domain::ports::ContentSink;

/// Saves each generated record through the collection add handler, so
/// generated records get the same ids, timestamps and validation as
/// hand-entered ones.
pub struct CollectionContentSink<'a> {
    correlation_id: Uuid,
    campaign_id: Uuid,
    clock: &'a dyn Clock,
    repo: &'a dyn RecordRepository,
}

impl<'a> CollectionContentSink<'a> {
    /// Create a sink writing into `campaign_id`'s collections.
    #[must_use]
    pub fn new(
        correlation_id: Uuid,
        campaign_id: Uuid,
        clock: &'a dyn Clock,
        repo: &'a dyn RecordRepository,
    ) -> Self {
        Self {
            correlation_id,
            campaign_id,
            clock,
            repo,
        }
    }

    async fn add<R: CampaignRecord>(&self, record: R) -> Result<(), DomainError> {
        let command = AddRecord {
            correlation_id: self.correlation_id,
            campaign_id: self.campaign_id,
            record,
        };
        handle_add_record(&command, self.clock, self.repo)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl ContentSink for CollectionContentSink<'_> {
    async fn add_npc(&self, npc: Npc) -> Result<(), DomainError> {
        self.add(npc).await
    }

    async fn add_location(&self, location: Location) -> Result<(), DomainError> {
        self.add(location).await
    }

    async fn add_lore(&self, lore: LoreEntry) -> Result<(), DomainError> {
        self.add(lore).await
    }

    async fn add_encounter(&self, encounter: Encounter) -> Result<(), DomainError> {
        self.add(encounter).await
    }

    async fn add_timeline_event(&self, event: TimelineEvent) -> Result<(), DomainError> {
        self.add(event).await
    }
}
