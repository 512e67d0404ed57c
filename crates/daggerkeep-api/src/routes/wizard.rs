//! Routes for the Campaign Builder Wizard bounded context.
//!
//! The wizard for a campaign lives in [`crate::state::WizardSessions`];
//! navigation and edits change it in memory and only `draft` and `complete`
//! write to storage.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use daggerkeep_wizard::application::query_handlers::{self, WizardView};
use daggerkeep_wizard::application::command_handlers;
use daggerkeep_wizard::domain::commands;
use daggerkeep_wizard::domain::draft::{FrameRecord, WizardDraft};
use daggerkeep_wizard::domain::frame::{FieldValue, FrameField};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{campaign_id}/wizard
#[instrument(skip(state))]
async fn get_wizard(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<WizardView>, ApiError> {
    let session = state.wizards.open(campaign_id, &*state.store).await?;
    let progress = session.lock().await;
    Ok(Json(WizardView::from(&*progress)))
}

/// PUT /{campaign_id}/wizard/data/{field}
#[instrument(skip(state, value))]
async fn update_data(
    State(state): State<AppState>,
    Path((campaign_id, field)): Path<(Uuid, String)>,
    Json(value): Json<FieldValue>,
) -> Result<Json<WizardView>, ApiError> {
    let field: FrameField = field.parse()?;
    let session = state.wizards.open(campaign_id, &*state.store).await?;
    let mut progress = session.lock().await;
    progress.update_data(field, value)?;
    Ok(Json(WizardView::from(&*progress)))
}

/// POST /{campaign_id}/wizard/next
#[instrument(skip(state))]
async fn next_step(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<WizardView>, ApiError> {
    let session = state.wizards.open(campaign_id, &*state.store).await?;
    let mut progress = session.lock().await;
    progress.next_step();
    Ok(Json(WizardView::from(&*progress)))
}

/// POST /{campaign_id}/wizard/previous
#[instrument(skip(state))]
async fn previous_step(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<WizardView>, ApiError> {
    let session = state.wizards.open(campaign_id, &*state.store).await?;
    let mut progress = session.lock().await;
    progress.previous_step();
    Ok(Json(WizardView::from(&*progress)))
}

/// POST /{campaign_id}/wizard/goto/{step}
#[instrument(skip(state))]
async fn go_to_step(
    State(state): State<AppState>,
    Path((campaign_id, step)): Path<(Uuid, usize)>,
) -> Result<Json<WizardView>, ApiError> {
    let session = state.wizards.open(campaign_id, &*state.store).await?;
    let mut progress = session.lock().await;
    progress.go_to_step(step)?;
    Ok(Json(WizardView::from(&*progress)))
}

/// POST /{campaign_id}/wizard/draft
#[instrument(skip(state))]
async fn save_draft(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<WizardDraft>, ApiError> {
    let command = commands::SaveDraft {
        correlation_id: Uuid::new_v4(),
        campaign_id,
    };

    info!(correlation_id = %command.correlation_id, "handling save_draft command");

    let session = state.wizards.open(campaign_id, &*state.store).await?;
    let progress = session.lock().await;
    let draft = command_handlers::handle_save_draft(
        &command,
        &progress,
        state.clock.as_ref(),
        &*state.store,
    )
    .await?;

    Ok(Json(draft))
}

/// POST /{campaign_id}/wizard/complete
#[instrument(skip(state))]
async fn complete_wizard(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<FrameRecord>, ApiError> {
    let command = commands::CompleteWizard {
        correlation_id: Uuid::new_v4(),
        campaign_id,
    };

    info!(correlation_id = %command.correlation_id, "handling complete_wizard command");

    let session = state.wizards.open(campaign_id, &*state.store).await?;
    let mut progress = session.lock().await;
    let record = command_handlers::handle_complete_wizard(
        &command,
        &mut progress,
        state.clock.as_ref(),
        &*state.store,
    )
    .await?;

    Ok(Json(record))
}

/// GET /{campaign_id}/frame
#[instrument(skip(state))]
async fn get_frame(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<FrameRecord>, ApiError> {
    let record = query_handlers::get_campaign_frame(campaign_id, &*state.store).await?;
    Ok(Json(record))
}

/// Returns the router for the wizard context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{campaign_id}/wizard", get(get_wizard))
        .route("/{campaign_id}/wizard/data/{field}", put(update_data))
        .route("/{campaign_id}/wizard/next", post(next_step))
        .route("/{campaign_id}/wizard/previous", post(previous_step))
        .route("/{campaign_id}/wizard/goto/{step}", post(go_to_step))
        .route("/{campaign_id}/wizard/draft", post(save_draft))
        .route("/{campaign_id}/wizard/complete", post(complete_wizard))
        .route("/{campaign_id}/frame", get(get_frame))
}
