//! Stored forms of wizard state.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::frame::CampaignFrame;

/// Key-value store key of a campaign's wizard draft.
#[must_use]
pub fn draft_key(campaign_id: Uuid) -> String {
    format!("wizard_draft:{campaign_id}")
}

/// Key-value store key of a campaign's permanent frame.
#[must_use]
pub fn frame_key(campaign_id: Uuid) -> String {
    format!("campaign_frame:{campaign_id}")
}

/// An in-progress wizard saved for later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDraft {
    /// Step the wizard was on.
    pub current_step: usize,
    /// Steps already passed.
    pub completed_steps: BTreeSet<usize>,
    /// Answers so far.
    pub data: CampaignFrame,
    /// When the draft was saved.
    pub saved_at: DateTime<Utc>,
}

/// A campaign's finished frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    /// The frame.
    pub frame: CampaignFrame,
    /// When the wizard was completed.
    pub completed_at: DateTime<Utc>,
}
