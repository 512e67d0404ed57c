//! Wizard state and navigation.
//!
//! Steps `0..STEP_COUNT` ask one question each, step [`REVIEW_STEP`] shows
//! the whole frame, and completion is terminal: once complete, navigation
//! does nothing and edits are refused.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use daggerkeep_core::error::DomainError;
use serde::Serialize;

use super::draft::WizardDraft;
use super::frame::{CampaignFrame, FieldValue, FrameField};
use super::steps::{REVIEW_STEP, STEPS, StepDescriptor};

/// A campaign's progress through the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    current_step: usize,
    completed_steps: BTreeSet<usize>,
    data: CampaignFrame,
    is_complete: bool,
}

impl WizardProgress {
    /// A fresh wizard on the first step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a saved draft. Out-of-range steps from older drafts are
    /// clamped or dropped.
    #[must_use]
    pub fn from_draft(draft: WizardDraft) -> Self {
        Self {
            current_step: draft.current_step.min(REVIEW_STEP),
            completed_steps: draft
                .completed_steps
                .into_iter()
                .filter(|step| *step < REVIEW_STEP)
                .collect(),
            data: draft.data,
            is_complete: false,
        }
    }

    /// A wizard whose frame has already been stored. Steps count as
    /// completed when the stored frame satisfies them.
    #[must_use]
    pub fn completed(frame: CampaignFrame) -> Self {
        Self {
            current_step: REVIEW_STEP,
            completed_steps: STEPS
                .iter()
                .enumerate()
                .filter(|(_, step)| step.is_satisfied(&frame))
                .map(|(index, _)| index)
                .collect(),
            data: frame,
            is_complete: true,
        }
    }

    /// Current step, `0..=REVIEW_STEP`.
    #[must_use]
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Steps passed with `next_step`.
    #[must_use]
    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.completed_steps
    }

    /// Answers so far.
    #[must_use]
    pub fn data(&self) -> &CampaignFrame {
        &self.data
    }

    /// Whether the frame has been stored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Whether the wizard is on the review step.
    #[must_use]
    pub fn on_review(&self) -> bool {
        self.current_step == REVIEW_STEP
    }

    /// Descriptor of the current question; `None` on review.
    #[must_use]
    pub fn current_descriptor(&self) -> Option<&'static StepDescriptor> {
        STEPS.get(self.current_step)
    }

    /// Replaces one field of the frame.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the wizard is complete or the
    /// value's shape does not match the field.
    pub fn update_data(&mut self, field: FrameField, value: FieldValue) -> Result<(), DomainError> {
        if self.is_complete {
            return Err(DomainError::Validation(
                "wizard is already complete".to_owned(),
            ));
        }
        self.data.set(field, value)
    }

    /// Whether the current step's field satisfies its rule. Always true on
    /// review.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.current_descriptor()
            .is_none_or(|step| step.is_satisfied(&self.data))
    }

    /// Marks the current step complete and advances. Returns whether the
    /// wizard moved.
    pub fn next_step(&mut self) -> bool {
        if self.is_complete || self.on_review() || !self.can_proceed() {
            return false;
        }
        self.completed_steps.insert(self.current_step);
        self.current_step += 1;
        true
    }

    /// Goes back one step. Returns whether the wizard moved.
    pub fn previous_step(&mut self) -> bool {
        if self.is_complete || self.current_step == 0 {
            return false;
        }
        self.current_step -= 1;
        true
    }

    /// Jumps to `step`, completed or not. Does nothing once complete.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `step` is past the review step.
    pub fn go_to_step(&mut self, step: usize) -> Result<(), DomainError> {
        if step > REVIEW_STEP {
            return Err(DomainError::Validation(format!(
                "step must be between 0 and {REVIEW_STEP}, got {step}"
            )));
        }
        if !self.is_complete {
            self.current_step = step;
        }
        Ok(())
    }

    /// Snapshot for the draft store.
    #[must_use]
    pub fn to_draft(&self, saved_at: DateTime<Utc>) -> WizardDraft {
        WizardDraft {
            current_step: self.current_step,
            completed_steps: self.completed_steps.clone(),
            data: self.data.clone(),
            saved_at,
        }
    }

    pub(crate) fn mark_complete(&mut self) {
        self.is_complete = true;
    }
}
