//! Command handlers for the Campaign Collections context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the current state, apply the command,
//! persist the result.

use std::sync::Mutex;

use daggerkeep_core::clock::Clock;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::record::StoredRecord;
use daggerkeep_core::repository::{KeyValueStore, RecordRepository};
use daggerkeep_core::rng::DeterministicRng;
use uuid::Uuid;

use crate::application::query_handlers::{self, RecordView};
use crate::domain::campaign::{Campaign, campaign_key};
use crate::domain::commands::{
    AddRecord, CreateCampaign, DeleteRecord, RollDuality, UpdateCampaign, UpdateRecord,
};
use crate::domain::dice::{self, DualityRoll, RollHistory};
use crate::domain::records::CampaignRecord;

/// Keys of a record's JSON form that an update may not change.
const IMMUTABLE_KEYS: [&str; 4] = ["id", "campaignId", "createdAt", "updatedAt"];

pub(crate) fn to_fields<R: CampaignRecord>(record: &R) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(record)
        .map_err(|e| DomainError::Infrastructure(format!("record serialization failed: {e}")))
}

pub(crate) async fn save_json<T: serde::Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), DomainError> {
    let json = serde_json::to_value(value)
        .map_err(|e| DomainError::Infrastructure(format!("serialization failed: {e}")))?;
    store.set(key, json).await
}

/// Handles the `CreateCampaign` command: fills in defaults and stores the
/// campaign's metadata.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name is blank or the campaign
/// already exists, or `DomainError::Infrastructure` if storage fails.
pub async fn handle_create_campaign(
    command: &CreateCampaign,
    clock: &dyn Clock,
    store: &dyn KeyValueStore,
) -> Result<Campaign, DomainError> {
    let key = campaign_key(command.campaign_id);
    if store.get(&key).await?.is_some() {
        return Err(DomainError::Validation(format!(
            "campaign {} already exists",
            command.campaign_id
        )));
    }

    let campaign = Campaign::new(
        command.campaign_id,
        command.name.clone(),
        command.description.clone(),
        clock.now(),
    )?;
    save_json(store, &key, &campaign).await?;
    Ok(campaign)
}

/// Handles the `UpdateCampaign` command.
///
/// # Errors
///
/// Returns `DomainError::CampaignNotFound` if the campaign does not exist,
/// `DomainError::Validation` if the new name is blank, or
/// `DomainError::Infrastructure` if storage fails.
pub async fn handle_update_campaign(
    command: &UpdateCampaign,
    clock: &dyn Clock,
    store: &dyn KeyValueStore,
) -> Result<Campaign, DomainError> {
    let mut campaign = query_handlers::get_campaign(command.campaign_id, store).await?;
    campaign.apply_changes(command.name.clone(), command.description.clone(), clock.now())?;
    save_json(store, &campaign_key(command.campaign_id), &campaign).await?;
    Ok(campaign)
}

/// Handles the `AddRecord` command: validates the record, assigns its id,
/// timestamps and (for numbered collections) its sequence number, then
/// inserts it.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the record is invalid, or
/// `DomainError::Infrastructure` if persistence fails.
pub async fn handle_add_record<R: CampaignRecord>(
    command: &AddRecord<R>,
    clock: &dyn Clock,
    repo: &dyn RecordRepository,
) -> Result<RecordView<R>, DomainError> {
    add_record_with_id(Uuid::new_v4(), command, clock, repo).await
}

/// Inserts a record under an id the caller already chose.
pub(crate) async fn add_record_with_id<R: CampaignRecord>(
    id: Uuid,
    command: &AddRecord<R>,
    clock: &dyn Clock,
    repo: &dyn RecordRepository,
) -> Result<RecordView<R>, DomainError> {
    let mut record = command.record.clone();
    record.validate()?;

    if R::SEQUENCED {
        let existing = query_handlers::list_records::<R>(command.campaign_id, repo).await?;
        let highest = existing
            .iter()
            .filter_map(|view| view.record.sequence())
            .max()
            .unwrap_or(0);
        record.assign_sequence(highest + 1);
    }

    let now = clock.now();
    let stored = StoredRecord {
        id,
        campaign_id: command.campaign_id,
        collection: R::COLLECTION,
        fields: to_fields(&record)?,
        created_at: now,
        updated_at: now,
    };
    repo.insert(&stored).await?;

    Ok(RecordView {
        id: stored.id,
        campaign_id: stored.campaign_id,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        record,
    })
}

/// Handles the `UpdateRecord` command: merges the changed fields into the
/// stored record, re-validates the result and refreshes `updatedAt`.
///
/// The record's id, campaign and creation time never change; keys naming
/// them are ignored.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if the record does not exist,
/// `DomainError::Validation` if the merged record is invalid, or
/// `DomainError::Infrastructure` if persistence fails.
pub async fn handle_update_record<R: CampaignRecord>(
    command: &UpdateRecord<R>,
    clock: &dyn Clock,
    repo: &dyn RecordRepository,
) -> Result<RecordView<R>, DomainError> {
    let mut stored = repo
        .load(command.campaign_id, R::COLLECTION, command.record_id)
        .await?
        .ok_or(DomainError::RecordNotFound(command.record_id))?;

    let mut merged = match stored.fields.take() {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    for (key, value) in &command.changes {
        if !IMMUTABLE_KEYS.contains(&key.as_str()) {
            merged.insert(key.clone(), value.clone());
        }
    }

    let record: R = serde_json::from_value(serde_json::Value::Object(merged))
        .map_err(|e| DomainError::Validation(format!("invalid {}: {e}", R::COLLECTION)))?;
    record.validate()?;

    stored.fields = to_fields(&record)?;
    stored.updated_at = clock.now().max(stored.created_at);
    repo.update(&stored).await?;

    Ok(RecordView {
        id: stored.id,
        campaign_id: stored.campaign_id,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
        record,
    })
}

/// Handles the `DeleteRecord` command.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if the record does not exist, or
/// `DomainError::Infrastructure` if persistence fails.
pub async fn handle_delete_record(
    command: &DeleteRecord,
    repo: &dyn RecordRepository,
) -> Result<(), DomainError> {
    repo.delete(command.campaign_id, command.collection, command.record_id)
        .await
}

/// Handles the `RollDuality` command: rolls the dice and records the roll in
/// the campaign's history.
///
/// The `Mutex` is locked only around the synchronous roll to avoid holding a
/// `MutexGuard` across await points.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the modifier is out of range, or
/// `DomainError::Infrastructure` if the RNG mutex is poisoned or storage
/// fails.
pub async fn handle_roll_duality(
    command: &RollDuality,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &dyn KeyValueStore,
) -> Result<DualityRoll, DomainError> {
    let roll = {
        let mut rng_guard = rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        dice::roll(command.modifier, &mut *rng_guard, clock)?
    };

    let key = dice::history_key(command.campaign_id);
    let mut history: RollHistory = match store.get(&key).await? {
        Some(json) => serde_json::from_value(json).map_err(|e| {
            DomainError::Infrastructure(format!("roll history deserialization failed: {e}"))
        })?,
        None => RollHistory::default(),
    };
    history.push(roll.clone());
    save_json(store, &key, &history).await?;

    Ok(roll)
}
