//! Query handlers for the Campaign Builder Wizard context.

use std::collections::BTreeSet;

use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::KeyValueStore;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::draft::{FrameRecord, WizardDraft, draft_key, frame_key};
use crate::domain::frame::CampaignFrame;
use crate::domain::progress::WizardProgress;
use crate::domain::steps::{STEPS, StepDescriptor};

/// Read-only view of a wizard, with the step table for rendering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    /// Current step; equal to the step count on review.
    pub current_step: usize,
    /// Descriptor of the current question; absent on review.
    pub current: Option<&'static StepDescriptor>,
    /// Steps passed so far.
    pub completed_steps: BTreeSet<usize>,
    /// Answers so far.
    pub data: CampaignFrame,
    /// Whether the current step lets the wizard move on.
    pub can_proceed: bool,
    /// Whether the frame has been stored.
    pub is_complete: bool,
    /// Every question step, in order.
    pub steps: &'static [StepDescriptor],
}

impl From<&WizardProgress> for WizardView {
    fn from(progress: &WizardProgress) -> Self {
        Self {
            current_step: progress.current_step(),
            current: progress.current_descriptor(),
            completed_steps: progress.completed_steps().clone(),
            data: progress.data().clone(),
            can_proceed: progress.can_proceed(),
            is_complete: progress.is_complete(),
            steps: &STEPS,
        }
    }
}

async fn read<T: serde::de::DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, DomainError> {
    match store.get(key).await? {
        Some(json) => serde_json::from_value(json).map(Some).map_err(|e| {
            DomainError::Infrastructure(format!("{key} deserialization failed: {e}"))
        }),
        None => Ok(None),
    }
}

/// Restores a campaign's wizard: complete if its frame is stored, otherwise
/// resumed from its draft, otherwise fresh.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if reading fails or a stored value
/// is unreadable.
pub async fn load_progress(
    campaign_id: Uuid,
    store: &dyn KeyValueStore,
) -> Result<WizardProgress, DomainError> {
    if let Some(record) = read::<FrameRecord>(store, &frame_key(campaign_id)).await? {
        return Ok(WizardProgress::completed(record.frame));
    }
    Ok(read::<WizardDraft>(store, &draft_key(campaign_id))
        .await?
        .map_or_else(WizardProgress::new, WizardProgress::from_draft))
}

/// Retrieves a campaign's permanent frame.
///
/// # Errors
///
/// Returns `DomainError::FrameNotFound` if the wizard has not been completed.
/// Returns `DomainError::Infrastructure` if reading fails.
pub async fn get_campaign_frame(
    campaign_id: Uuid,
    store: &dyn KeyValueStore,
) -> Result<FrameRecord, DomainError> {
    read::<FrameRecord>(store, &frame_key(campaign_id))
        .await?
        .ok_or(DomainError::FrameNotFound(campaign_id))
}
