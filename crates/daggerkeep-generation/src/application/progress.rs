//! Progress reporter that keeps every message.

use std::sync::Mutex;

use tracing::info;
use uuid::Uuid;

use crate::domain::ports::ProgressReporter;

/// Collects progress messages in order and logs each one.
#[derive(Debug)]
pub struct ProgressLog {
    campaign_id: Uuid,
    messages: Mutex<Vec<String>>,
}

impl ProgressLog {
    /// Create an empty log for `campaign_id`.
    #[must_use]
    pub fn new(campaign_id: Uuid) -> Self {
        Self {
            campaign_id,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Messages reported so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl ProgressReporter for ProgressLog {
    fn report(&self, message: &str) {
        info!(campaign_id = %self.campaign_id, progress = message, "generation progress");
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_owned());
        }
    }
}
