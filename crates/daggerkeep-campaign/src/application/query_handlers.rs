//! Query handlers for the Campaign Collections context.
//!
//! This module contains query handlers that load stored state and return
//! read-only view DTOs.

use chrono::{DateTime, Utc};
use daggerkeep_core::error::DomainError;
use daggerkeep_core::record::StoredRecord;
use daggerkeep_core::repository::{KeyValueStore, RecordRepository};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::campaign::{Campaign, campaign_key};
use crate::domain::dice::{DualityRoll, RollHistory, history_key};
use crate::domain::records::CampaignRecord;

/// Read-only view of a stored record: identity and timestamps alongside the
/// record's own fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView<R> {
    /// The record identifier.
    pub id: Uuid,
    /// The owning campaign.
    pub campaign_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// The record's fields.
    #[serde(flatten)]
    pub record: R,
}

/// Decodes a stored record into its typed view.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the stored fields no longer match
/// the record type.
pub fn to_view<R: CampaignRecord>(stored: StoredRecord) -> Result<RecordView<R>, DomainError> {
    let record: R = serde_json::from_value(stored.fields).map_err(|e| {
        DomainError::Infrastructure(format!(
            "{} record {} deserialization failed: {e}",
            stored.collection, stored.id
        ))
    })?;
    Ok(RecordView {
        id: stored.id,
        campaign_id: stored.campaign_id,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        record,
    })
}

/// Retrieves a campaign's metadata.
///
/// # Errors
///
/// Returns `DomainError::CampaignNotFound` if the campaign does not exist.
/// Returns `DomainError::Infrastructure` if the stored value is unreadable.
pub async fn get_campaign(
    campaign_id: Uuid,
    store: &dyn KeyValueStore,
) -> Result<Campaign, DomainError> {
    let json = store
        .get(&campaign_key(campaign_id))
        .await?
        .ok_or(DomainError::CampaignNotFound(campaign_id))?;
    serde_json::from_value(json)
        .map_err(|e| DomainError::Infrastructure(format!("campaign deserialization failed: {e}")))
}

/// Lists every record of `R`'s collection, oldest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if loading or decoding fails.
pub async fn list_records<R: CampaignRecord>(
    campaign_id: Uuid,
    repo: &dyn RecordRepository,
) -> Result<Vec<RecordView<R>>, DomainError> {
    repo.list(campaign_id, R::COLLECTION)
        .await?
        .into_iter()
        .map(to_view)
        .collect()
}

/// Retrieves a single record.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if no such record exists.
/// Returns `DomainError::Infrastructure` if loading or decoding fails.
pub async fn get_record<R: CampaignRecord>(
    campaign_id: Uuid,
    record_id: Uuid,
    repo: &dyn RecordRepository,
) -> Result<RecordView<R>, DomainError> {
    let stored = repo
        .load(campaign_id, R::COLLECTION, record_id)
        .await?
        .ok_or(DomainError::RecordNotFound(record_id))?;
    to_view(stored)
}

/// Retrieves a campaign's recent duality rolls, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the stored history is unreadable.
pub async fn get_roll_history(
    campaign_id: Uuid,
    store: &dyn KeyValueStore,
) -> Result<Vec<DualityRoll>, DomainError> {
    match store.get(&history_key(campaign_id)).await? {
        Some(json) => {
            let history: RollHistory = serde_json::from_value(json).map_err(|e| {
                DomainError::Infrastructure(format!("roll history deserialization failed: {e}"))
            })?;
            Ok(history.rolls())
        }
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use daggerkeep_core::error::DomainError;
    use daggerkeep_core::record::{Collection, StoredRecord};
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::domain::records::{LoreEntry, LoreType, Npc};
    use daggerkeep_test_support::{
        FailingRecordRepository, InMemoryKeyValueStore, InMemoryRecordRepository,
    };

    fn stored(campaign_id: Uuid, collection: Collection, fields: serde_json::Value) -> StoredRecord {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        StoredRecord {
            id: Uuid::new_v4(),
            campaign_id,
            collection,
            fields,
            created_at,
            updated_at: created_at + Duration::minutes(1),
        }
    }

    #[tokio::test]
    async fn test_get_record_returns_typed_view() {
        // Arrange
        let campaign_id = Uuid::new_v4();
        let record = stored(
            campaign_id,
            Collection::Lore,
            json!({ "title": "The Sundering", "type": "history", "hidden": true }),
        );
        let record_id = record.id;
        let repo = InMemoryRecordRepository::with_records(vec![record]);

        // Act
        let view = get_record::<LoreEntry>(campaign_id, record_id, &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(view.id, record_id);
        assert_eq!(view.record.title, "The Sundering");
        assert_eq!(view.record.kind, LoreType::History);
        assert!(view.record.hidden);
    }

    #[tokio::test]
    async fn test_get_record_missing_is_not_found() {
        let repo = InMemoryRecordRepository::new();
        let record_id = Uuid::new_v4();

        let result = get_record::<Npc>(Uuid::new_v4(), record_id, &repo).await;

        match result {
            Err(DomainError::RecordNotFound(id)) => assert_eq!(id, record_id),
            other => panic!("expected RecordNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_records_only_returns_own_collection() {
        let campaign_id = Uuid::new_v4();
        let repo = InMemoryRecordRepository::with_records(vec![
            stored(campaign_id, Collection::Npcs, json!({ "name": "Mira" })),
            stored(campaign_id, Collection::Lore, json!({ "title": "Old Gods" })),
            stored(Uuid::new_v4(), Collection::Npcs, json!({ "name": "Elsewhere" })),
        ]);

        let npcs = list_records::<Npc>(campaign_id, &repo).await.unwrap();

        assert_eq!(npcs.len(), 1);
        assert_eq!(npcs[0].record.name, "Mira");
    }

    #[tokio::test]
    async fn test_list_records_propagates_failure() {
        let result = list_records::<Npc>(Uuid::new_v4(), &FailingRecordRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_record_view_flattens_fields() {
        let campaign_id = Uuid::new_v4();
        let view = to_view::<Npc>(stored(
            campaign_id,
            Collection::Npcs,
            json!({ "name": "Mira", "role": "innkeeper" }),
        ))
        .unwrap();

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["campaignId"], campaign_id.to_string());
        assert_eq!(json["name"], "Mira");
        assert_eq!(json["role"], "innkeeper");
        assert!(json.get("record").is_none());
    }

    #[tokio::test]
    async fn test_get_roll_history_empty_when_never_rolled() {
        let store = InMemoryKeyValueStore::new();

        let history = get_roll_history(Uuid::new_v4(), &store).await.unwrap();

        assert!(history.is_empty());
    }
}
