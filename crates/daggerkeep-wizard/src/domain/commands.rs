//! Commands for the Campaign Builder Wizard context.

use daggerkeep_core::command::Command;
use uuid::Uuid;

/// Command to save the wizard's current state as a draft.
#[derive(Debug, Clone)]
pub struct SaveDraft {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
}

impl Command for SaveDraft {
    fn command_type(&self) -> &'static str {
        "wizard.save_draft"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}

/// Command to finish the wizard and store the campaign frame.
#[derive(Debug, Clone)]
pub struct CompleteWizard {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
}

impl Command for CompleteWizard {
    fn command_type(&self) -> &'static str {
        "wizard.complete"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}
