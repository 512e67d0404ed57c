//! Routes for AI provider settings.
//!
//! Keys go in but never come back out: every response lists only which
//! providers are configured.

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use daggerkeep_generation::application::credentials;
use daggerkeep_generation::domain::credentials::{ApiKeys, Provider};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for PUT /api-keys/{provider}.
#[derive(Deserialize)]
pub struct SaveKeyRequest {
    /// The API key.
    pub key: String,
}

/// Which providers have a key.
#[derive(Debug, Serialize)]
pub struct ApiKeyStatus {
    /// Providers with a key, most preferred first.
    pub configured: Vec<Provider>,
    /// Provider generation will use.
    pub preferred: Option<Provider>,
}

impl From<&ApiKeys> for ApiKeyStatus {
    fn from(keys: &ApiKeys) -> Self {
        Self {
            configured: keys.configured(),
            preferred: keys.preferred(),
        }
    }
}

/// Response body for POST /api-keys/{provider}/test.
#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    /// Provider that was tested.
    pub provider: Provider,
    /// The provider's reply.
    pub reply: String,
}

/// GET /api-keys
#[instrument(skip(state))]
async fn get_api_keys(State(state): State<AppState>) -> Result<Json<ApiKeyStatus>, ApiError> {
    let keys = credentials::load_api_keys(&*state.store).await?;
    Ok(Json(ApiKeyStatus::from(&keys)))
}

/// PUT /api-keys/{provider}
#[instrument(skip(state, request))]
async fn save_api_key(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(request): Json<SaveKeyRequest>,
) -> Result<Json<ApiKeyStatus>, ApiError> {
    let provider: Provider = provider.parse()?;

    info!(provider = %provider, "handling save_api_key command");

    let keys = credentials::save_api_key(provider, &request.key, &*state.store).await?;
    Ok(Json(ApiKeyStatus::from(&keys)))
}

/// DELETE /api-keys/{provider}
#[instrument(skip(state))]
async fn remove_api_key(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<ApiKeyStatus>, ApiError> {
    let provider: Provider = provider.parse()?;

    info!(provider = %provider, "handling remove_api_key command");

    let keys = credentials::remove_api_key(provider, &*state.store).await?;
    Ok(Json(ApiKeyStatus::from(&keys)))
}

/// POST /api-keys/{provider}/test
#[instrument(skip(state))]
async fn test_connection(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Json<ConnectionTestResponse>, ApiError> {
    let provider: Provider = provider.parse()?;
    let reply =
        credentials::test_connection(provider, &*state.store, &*state.generator).await?;
    Ok(Json(ConnectionTestResponse { provider, reply }))
}

/// Returns the router for settings.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api-keys", get(get_api_keys))
        .route(
            "/api-keys/{provider}",
            put(save_api_key).delete(remove_api_key),
        )
        .route("/api-keys/{provider}/test", post(test_connection))
}
