//! Campaign generation orchestrator.
//!
//! Runs the wizard's finishing sequence: store the frame, ask the provider
//! for starter content, then save that content collection by collection.
//! Every call is awaited before the next starts, so progress text always
//! names the step in flight and a failure stops at a known point.

use daggerkeep_core::clock::Clock;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::record::Collection;
use daggerkeep_core::repository::KeyValueStore;
use daggerkeep_wizard::application::command_handlers::handle_complete_wizard;
use daggerkeep_wizard::domain::commands::CompleteWizard;
use daggerkeep_wizard::domain::progress::WizardProgress;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::content::{GeneratedContent, parse_generated_content};
use crate::domain::credentials::Provider;
use crate::domain::outcome::{GenerationOutcome, GenerationStage, GenerationSummary};
use crate::domain::ports::{ContentSink, ProgressReporter, TextGenerator};
use crate::domain::prompt::build_generation_prompt;

/// Everything a generation run needs to know about the campaign and the
/// provider to use.
#[derive(Clone)]
pub struct GenerationRequest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign being generated.
    pub campaign_id: Uuid,
    /// Campaign name, for the prompt.
    pub campaign_name: String,
    /// Campaign description, for the prompt.
    pub campaign_description: String,
    /// Provider to generate with.
    pub provider: Provider,
    /// That provider's API key.
    pub api_key: String,
}

impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("correlation_id", &self.correlation_id)
            .field("campaign_id", &self.campaign_id)
            .field("campaign_name", &self.campaign_name)
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Collaborators of a generation run.
pub struct GenerationDeps<'a> {
    /// Time source for the frame record.
    pub clock: &'a dyn Clock,
    /// Store for the frame record and wizard draft.
    pub store: &'a dyn KeyValueStore,
    /// AI provider client.
    pub generator: &'a dyn TextGenerator,
    /// Destination of generated records.
    pub sink: &'a dyn ContentSink,
    /// Receiver of progress text.
    pub progress: &'a dyn ProgressReporter,
}

fn failed(
    progress: &dyn ProgressReporter,
    stage: GenerationStage,
    error: &DomainError,
) -> GenerationOutcome {
    let message = error.to_string();
    progress.report(&format!("Error: {message}"));
    warn!(?stage, error = %message, "campaign generation failed");
    GenerationOutcome::Failed { stage, message }
}

/// Runs a generation for the wizard in `wizard`, which must be on its review
/// step.
///
/// The outcome is returned as soon as the run ends; records saved before a
/// failure remain saved.
#[instrument(skip_all, fields(correlation_id = %request.correlation_id, campaign_id = %request.campaign_id, provider = %request.provider))]
pub async fn generate_campaign(
    request: &GenerationRequest,
    wizard: &mut WizardProgress,
    deps: &GenerationDeps<'_>,
) -> GenerationOutcome {
    let progress = deps.progress;

    progress.report("Saving campaign frame...");
    let complete = CompleteWizard {
        correlation_id: request.correlation_id,
        campaign_id: request.campaign_id,
    };
    if let Err(e) = handle_complete_wizard(&complete, wizard, deps.clock, deps.store).await {
        return failed(progress, GenerationStage::SaveFrame, &e);
    }

    progress.report("Generating NPCs...");
    let prompt = build_generation_prompt(
        &request.campaign_name,
        &request.campaign_description,
        wizard.data(),
    );
    let content = match deps
        .generator
        .generate(request.provider, &request.api_key, &prompt)
        .await
        .and_then(|reply| parse_generated_content(&reply))
    {
        Ok(content) => content,
        Err(e) => return failed(progress, GenerationStage::Generate, &e),
    };

    match persist(content, deps.sink, progress).await {
        Ok(summary) => {
            progress.report("Complete!");
            info!(?summary, "campaign generation complete");
            GenerationOutcome::Completed { summary }
        }
        Err((collection, e)) => failed(progress, GenerationStage::Persist(collection), &e),
    }
}

async fn persist(
    content: GeneratedContent,
    sink: &dyn ContentSink,
    progress: &dyn ProgressReporter,
) -> Result<GenerationSummary, (Collection, DomainError)> {
    let GeneratedContent {
        npcs,
        locations,
        lore,
        encounters,
        timeline_events,
    } = content;
    let mut summary = GenerationSummary::default();

    progress.report(&format!("Saving {} npcs...", npcs.len()));
    for npc in npcs {
        sink.add_npc(npc).await.map_err(|e| (Collection::Npcs, e))?;
        summary.npcs += 1;
    }

    progress.report(&format!("Saving {} locations...", locations.len()));
    for location in locations {
        sink.add_location(location)
            .await
            .map_err(|e| (Collection::Locations, e))?;
        summary.locations += 1;
    }

    progress.report(&format!("Saving {} lore entries...", lore.len()));
    for entry in lore {
        sink.add_lore(entry).await.map_err(|e| (Collection::Lore, e))?;
        summary.lore += 1;
    }

    progress.report(&format!("Saving {} encounters...", encounters.len()));
    for encounter in encounters {
        sink.add_encounter(encounter)
            .await
            .map_err(|e| (Collection::Encounters, e))?;
        summary.encounters += 1;
    }

    progress.report(&format!(
        "Saving {} timeline events...",
        timeline_events.len()
    ));
    for event in timeline_events {
        sink.add_timeline_event(event)
            .await
            .map_err(|e| (Collection::TimelineEvents, e))?;
        summary.timeline_events += 1;
    }

    Ok(summary)
}
