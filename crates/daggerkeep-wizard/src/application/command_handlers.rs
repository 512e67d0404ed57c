//! Command handlers for the Campaign Builder Wizard context.
//!
//! The wizard itself lives in memory; these handlers persist it. A failed
//! write leaves the in-memory wizard exactly as it was.

use daggerkeep_core::clock::Clock;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::KeyValueStore;
use tracing::warn;

use crate::domain::commands::{CompleteWizard, SaveDraft};
use crate::domain::draft::{FrameRecord, WizardDraft, draft_key, frame_key};
use crate::domain::progress::WizardProgress;

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::Infrastructure(format!("serialization failed: {e}")))
}

/// Handles the `SaveDraft` command: stores the wizard's position, completed
/// steps and answers. Saving the same state twice stores the same draft.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the wizard is already complete, or
/// `DomainError::Infrastructure` if the write fails.
pub async fn handle_save_draft(
    command: &SaveDraft,
    progress: &WizardProgress,
    clock: &dyn Clock,
    store: &dyn KeyValueStore,
) -> Result<WizardDraft, DomainError> {
    if progress.is_complete() {
        return Err(DomainError::Validation(
            "wizard is already complete".to_owned(),
        ));
    }
    let draft = progress.to_draft(clock.now());
    store
        .set(&draft_key(command.campaign_id), to_json(&draft)?)
        .await?;
    Ok(draft)
}

/// Handles the `CompleteWizard` command: stores the frame as the campaign's
/// permanent frame, marks the wizard complete and discards the draft.
///
/// Failing to discard the draft is logged and otherwise ignored; the stored
/// frame takes precedence over any leftover draft.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the wizard is not on the review step
/// or is already complete, or `DomainError::Infrastructure` if the frame
/// cannot be stored. On error the wizard stays incomplete.
pub async fn handle_complete_wizard(
    command: &CompleteWizard,
    progress: &mut WizardProgress,
    clock: &dyn Clock,
    store: &dyn KeyValueStore,
) -> Result<FrameRecord, DomainError> {
    if progress.is_complete() {
        return Err(DomainError::Validation(
            "wizard is already complete".to_owned(),
        ));
    }
    if !progress.on_review() {
        return Err(DomainError::Validation(format!(
            "wizard must be on the review step to complete, currently on step {}",
            progress.current_step()
        )));
    }

    let record = FrameRecord {
        frame: progress.data().clone(),
        completed_at: clock.now(),
    };
    store
        .set(&frame_key(command.campaign_id), to_json(&record)?)
        .await?;
    progress.mark_complete();

    if let Err(e) = store.remove(&draft_key(command.campaign_id)).await {
        warn!(
            correlation_id = %command.correlation_id,
            campaign_id = %command.campaign_id,
            error = %e,
            "failed to remove wizard draft after completion"
        );
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use daggerkeep_core::error::DomainError;
    use uuid::Uuid;

    use super::*;
    use crate::domain::frame::{FieldValue, FrameField};
    use crate::domain::steps::REVIEW_STEP;
    use daggerkeep_test_support::{
        FailingKeyValueStore, FixedClock, InMemoryKeyValueStore, RemoveFailsKeyValueStore,
    };

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn wizard_on_review() -> WizardProgress {
        let mut wizard = WizardProgress::new();
        wizard
            .update_data(FrameField::Pitch, FieldValue::Text("Storm over Haven".to_owned()))
            .unwrap();
        wizard.go_to_step(REVIEW_STEP).unwrap();
        wizard
    }

    fn complete_command(campaign_id: Uuid) -> CompleteWizard {
        CompleteWizard {
            correlation_id: Uuid::new_v4(),
            campaign_id,
        }
    }

    #[tokio::test]
    async fn test_handle_save_draft_persists_state() {
        // Arrange
        let store = InMemoryKeyValueStore::new();
        let campaign_id = Uuid::new_v4();
        let mut wizard = WizardProgress::new();
        wizard
            .update_data(FrameField::Pitch, FieldValue::Text("x".to_owned()))
            .unwrap();
        wizard.next_step();
        let command = SaveDraft {
            correlation_id: Uuid::new_v4(),
            campaign_id,
        };

        // Act
        let draft = handle_save_draft(&command, &wizard, &fixed_clock(), &store)
            .await
            .unwrap();

        // Assert
        assert_eq!(draft.current_step, 1);
        let stored: WizardDraft =
            serde_json::from_value(store.snapshot(&draft_key(campaign_id)).unwrap()).unwrap();
        assert_eq!(stored, draft);
    }

    #[tokio::test]
    async fn test_handle_save_draft_is_idempotent() {
        let store = InMemoryKeyValueStore::new();
        let campaign_id = Uuid::new_v4();
        let wizard = WizardProgress::new();
        let command = SaveDraft {
            correlation_id: Uuid::new_v4(),
            campaign_id,
        };

        handle_save_draft(&command, &wizard, &fixed_clock(), &store)
            .await
            .unwrap();
        let first = store.snapshot(&draft_key(campaign_id));
        handle_save_draft(&command, &wizard, &fixed_clock(), &store)
            .await
            .unwrap();

        assert_eq!(store.snapshot(&draft_key(campaign_id)), first);
    }

    #[tokio::test]
    async fn test_handle_save_draft_failure_keeps_wizard() {
        let mut wizard = WizardProgress::new();
        wizard
            .update_data(FrameField::Pitch, FieldValue::Text("x".to_owned()))
            .unwrap();
        let before = wizard.clone();
        let command = SaveDraft {
            correlation_id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
        };

        let result = handle_save_draft(&command, &wizard, &fixed_clock(), &FailingKeyValueStore).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert_eq!(wizard, before);
    }

    #[tokio::test]
    async fn test_handle_complete_wizard_stores_frame_and_removes_draft() {
        // Arrange
        let store = InMemoryKeyValueStore::new();
        let campaign_id = Uuid::new_v4();
        let mut wizard = wizard_on_review();
        handle_save_draft(
            &SaveDraft {
                correlation_id: Uuid::new_v4(),
                campaign_id,
            },
            &wizard,
            &fixed_clock(),
            &store,
        )
        .await
        .unwrap();

        // Act
        let record = handle_complete_wizard(
            &complete_command(campaign_id),
            &mut wizard,
            &fixed_clock(),
            &store,
        )
        .await
        .unwrap();

        // Assert
        assert!(wizard.is_complete());
        assert_eq!(record.frame.pitch, "Storm over Haven");
        assert!(store.snapshot(&frame_key(campaign_id)).is_some());
        assert!(store.snapshot(&draft_key(campaign_id)).is_none());
    }

    #[tokio::test]
    async fn test_handle_complete_wizard_only_from_review() {
        let store = InMemoryKeyValueStore::new();
        let campaign_id = Uuid::new_v4();
        let mut wizard = WizardProgress::new();

        let result = handle_complete_wizard(
            &complete_command(campaign_id),
            &mut wizard,
            &fixed_clock(),
            &store,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(!wizard.is_complete());
        assert!(store.snapshot(&frame_key(campaign_id)).is_none());
    }

    #[tokio::test]
    async fn test_handle_complete_wizard_only_once() {
        let store = InMemoryKeyValueStore::new();
        let campaign_id = Uuid::new_v4();
        let mut wizard = wizard_on_review();
        handle_complete_wizard(
            &complete_command(campaign_id),
            &mut wizard,
            &fixed_clock(),
            &store,
        )
        .await
        .unwrap();

        let second = handle_complete_wizard(
            &complete_command(campaign_id),
            &mut wizard,
            &fixed_clock(),
            &store,
        )
        .await;

        assert!(matches!(second, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_complete_wizard_failure_leaves_wizard_incomplete() {
        let mut wizard = wizard_on_review();

        let result = handle_complete_wizard(
            &complete_command(Uuid::new_v4()),
            &mut wizard,
            &fixed_clock(),
            &FailingKeyValueStore,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert!(!wizard.is_complete());
        assert!(wizard.on_review());
    }

    #[tokio::test]
    async fn test_handle_complete_wizard_ignores_draft_removal_failure() {
        let store = RemoveFailsKeyValueStore::new();
        let campaign_id = Uuid::new_v4();
        let mut wizard = wizard_on_review();

        let result = handle_complete_wizard(
            &complete_command(campaign_id),
            &mut wizard,
            &fixed_clock(),
            &store,
        )
        .await;

        assert!(result.is_ok());
        assert!(wizard.is_complete());
        assert!(store.snapshot(&frame_key(campaign_id)).is_some());
    }
}
