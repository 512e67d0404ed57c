//! Routes for campaign metadata.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use daggerkeep_campaign::application::{command_handlers, query_handlers};
use daggerkeep_campaign::domain::campaign::Campaign;
use daggerkeep_campaign::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    /// Identifier to use; generated when absent.
    #[serde(default)]
    pub campaign_id: Option<Uuid>,
    /// Display name; defaulted when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Description; defaulted when absent.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for PATCH /{campaign_id}.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCampaignRequest {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

/// POST /
#[instrument(skip(state, request))]
async fn create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<Json<Campaign>, ApiError> {
    let command = commands::CreateCampaign {
        correlation_id: Uuid::new_v4(),
        campaign_id: request.campaign_id.unwrap_or_else(Uuid::new_v4),
        name: request.name,
        description: request.description,
    };

    info!(
        correlation_id = %command.correlation_id,
        campaign_id = %command.campaign_id,
        "handling create_campaign command"
    );

    let campaign =
        command_handlers::handle_create_campaign(&command, state.clock.as_ref(), &*state.store)
            .await?;

    Ok(Json(campaign))
}

/// GET /{campaign_id}
#[instrument(skip(state))]
async fn get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Campaign>, ApiError> {
    let campaign = query_handlers::get_campaign(campaign_id, &*state.store).await?;
    Ok(Json(campaign))
}

/// PATCH /{campaign_id}
#[instrument(skip(state, request))]
async fn update_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Json(request): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, ApiError> {
    let command = commands::UpdateCampaign {
        correlation_id: Uuid::new_v4(),
        campaign_id,
        name: request.name,
        description: request.description,
    };

    info!(correlation_id = %command.correlation_id, "handling update_campaign command");

    let campaign =
        command_handlers::handle_update_campaign(&command, state.clock.as_ref(), &*state.store)
            .await?;

    Ok(Json(campaign))
}

/// Returns the router for campaign metadata.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_campaign)).route(
        "/{campaign_id}",
        get(get_campaign).patch(update_campaign),
    )
}
