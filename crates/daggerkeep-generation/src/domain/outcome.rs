//! Result of a generation run.

use daggerkeep_core::record::Collection;
use serde::Serialize;

/// Where a generation run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "collection", rename_all = "camelCase")]
pub enum GenerationStage {
    /// Storing the campaign frame.
    SaveFrame,
    /// Calling the provider or reading its response.
    Generate,
    /// Saving generated records into a collection.
    Persist(Collection),
}

/// How many records of each kind were saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    /// NPCs saved.
    pub npcs: usize,
    /// Locations saved.
    pub locations: usize,
    /// Lore entries saved.
    pub lore: usize,
    /// Encounters saved.
    pub encounters: usize,
    /// Timeline events saved.
    pub timeline_events: usize,
}

/// Outcome of a generation run. Records saved before a failure stay saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GenerationOutcome {
    /// Every stage succeeded.
    Completed {
        /// Counts of saved records.
        summary: GenerationSummary,
    },
    /// A stage failed; later stages did not run.
    Failed {
        /// The stage that failed.
        stage: GenerationStage,
        /// Human-readable failure message.
        message: String,
    },
}

impl GenerationOutcome {
    /// Whether the run completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, GenerationOutcome::Completed { .. })
    }
}
