//! Routes for the duality dice roller.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use daggerkeep_campaign::application::{command_handlers, query_handlers};
use daggerkeep_campaign::domain::commands;
use daggerkeep_campaign::domain::dice::DualityRoll;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{campaign_id}/dice/roll.
#[derive(Debug, Default, Deserialize)]
pub struct RollRequest {
    /// Added to the higher die.
    #[serde(default)]
    pub modifier: i32,
}

/// POST /{campaign_id}/dice/roll
#[instrument(skip(state, request), fields(modifier = request.modifier))]
async fn roll(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Json(request): Json<RollRequest>,
) -> Result<Json<DualityRoll>, ApiError> {
    let command = commands::RollDuality {
        correlation_id: Uuid::new_v4(),
        campaign_id,
        modifier: request.modifier,
    };

    info!(correlation_id = %command.correlation_id, "handling roll_duality command");

    let roll = command_handlers::handle_roll_duality(
        &command,
        state.clock.as_ref(),
        &state.rng,
        &*state.store,
    )
    .await?;

    Ok(Json(roll))
}

/// GET /{campaign_id}/dice/history
#[instrument(skip(state))]
async fn history(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Vec<DualityRoll>>, ApiError> {
    let rolls = query_handlers::get_roll_history(campaign_id, &*state.store).await?;
    Ok(Json(rolls))
}

/// Returns the router for the dice roller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{campaign_id}/dice/roll", post(roll))
        .route("/{campaign_id}/dice/history", get(history))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use daggerkeep_test_support::SequenceRng;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{
        CannedGenerator, Fakes, empty_request, json_request, read_json, state_with,
    };

    fn app_with_faces(faces: Vec<u32>) -> Router {
        let fakes = Fakes {
            rng: SequenceRng::new(faces),
            ..Fakes::default()
        };
        router().with_state(state_with(fakes, Arc::new(CannedGenerator::replying(""))))
    }

    #[tokio::test]
    async fn test_roll_with_fear_and_history() {
        // Arrange
        let app = app_with_faces(vec![4, 9, 7, 7]);
        let campaign_id = Uuid::new_v4();
        let uri = format!("/{campaign_id}/dice/roll");

        // Act
        let first = app
            .clone()
            .oneshot(json_request("POST", &uri, &json!({ "modifier": 2 })))
            .await
            .unwrap();
        let second = app
            .clone()
            .oneshot(json_request("POST", &uri, &json!({})))
            .await
            .unwrap();
        let history = app
            .oneshot(empty_request(
                "GET",
                &format!("/{campaign_id}/dice/history"),
            ))
            .await
            .unwrap();

        // Assert
        let (status, first) = read_json(first).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["hopeDie"], 4);
        assert_eq!(first["fearDie"], 9);
        assert_eq!(first["total"], 11);
        assert_eq!(first["outcome"], "fear");
        let (_, second) = read_json(second).await;
        assert_eq!(second["outcome"], "hope");
        let (status, history) = read_json(history).await;
        assert_eq!(status, StatusCode::OK);
        let totals: Vec<i64> = history
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["total"].as_i64().unwrap())
            .collect();
        assert_eq!(totals, vec![7, 11]);
    }

    #[tokio::test]
    async fn test_modifier_out_of_range_returns_400() {
        let app = app_with_faces(vec![]);

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/{}/dice/roll", Uuid::new_v4()),
                &json!({ "modifier": 11 }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
