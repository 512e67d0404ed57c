//! Route for AI campaign generation.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use daggerkeep_campaign::application::query_handlers::get_campaign;
use daggerkeep_campaign::domain::campaign::{DEFAULT_CAMPAIGN_DESCRIPTION, DEFAULT_CAMPAIGN_NAME};
use daggerkeep_core::error::DomainError;
use daggerkeep_generation::application::credentials::load_api_keys;
use daggerkeep_generation::application::orchestrator::{
    GenerationDeps, GenerationRequest, generate_campaign,
};
use daggerkeep_generation::application::progress::ProgressLog;
use daggerkeep_generation::application::sink::CollectionContentSink;
use daggerkeep_generation::domain::credentials::Provider;
use daggerkeep_generation::domain::outcome::GenerationOutcome;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for POST /{campaign_id}/generate.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Provider the content was requested from.
    pub provider: Provider,
    /// How the run ended.
    pub outcome: GenerationOutcome,
    /// Every progress message, in order.
    pub progress: Vec<String>,
}

/// POST /{campaign_id}/generate
///
/// Runs the whole generation before responding. A failed run is still a
/// successful request; the outcome says where it stopped.
#[instrument(skip(state))]
async fn generate(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let (provider, api_key) = load_api_keys(&*state.store).await?.select()?;

    let (campaign_name, campaign_description) =
        match get_campaign(campaign_id, &*state.store).await {
            Ok(campaign) => (campaign.name, campaign.description),
            Err(DomainError::CampaignNotFound(_)) => (
                DEFAULT_CAMPAIGN_NAME.to_owned(),
                DEFAULT_CAMPAIGN_DESCRIPTION.to_owned(),
            ),
            Err(e) => return Err(e.into()),
        };

    let request = GenerationRequest {
        correlation_id: Uuid::new_v4(),
        campaign_id,
        campaign_name,
        campaign_description,
        provider,
        api_key,
    };

    info!(
        correlation_id = %request.correlation_id,
        provider = %provider,
        "handling generate_campaign command"
    );

    let session = state.wizards.open(campaign_id, &*state.store).await?;
    let mut wizard = session.lock().await;

    let progress = ProgressLog::new(campaign_id);
    let sink = CollectionContentSink::new(
        request.correlation_id,
        campaign_id,
        state.clock.as_ref(),
        &*state.records,
    );
    let deps = GenerationDeps {
        clock: state.clock.as_ref(),
        store: &*state.store,
        generator: &*state.generator,
        sink: &sink,
        progress: &progress,
    };

    let outcome = generate_campaign(&request, &mut wizard, &deps).await;

    Ok(Json(GenerateResponse {
        provider,
        outcome,
        progress: progress.messages(),
    }))
}

/// Returns the router for campaign generation.
pub fn router() -> Router<AppState> {
    Router::new().route("/{campaign_id}/generate", post(generate))
}
