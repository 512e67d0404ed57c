//! Routes for the per-campaign record collections.
//!
//! Every collection gets the same five endpoints; the record type picks the
//! collection, its validation and its JSON shape.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use daggerkeep_campaign::application::query_handlers::RecordView;
use daggerkeep_campaign::application::{command_handlers, query_handlers};
use daggerkeep_campaign::domain::commands;
use daggerkeep_campaign::domain::records::{
    CampaignRecord, Character, Encounter, Location, LoreEntry, Npc, Session, TimelineEvent,
};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{campaign_id}/{collection}
#[instrument(skip(state), fields(collection = %R::COLLECTION))]
async fn list_records<R: CampaignRecord>(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Vec<RecordView<R>>>, ApiError> {
    let records = query_handlers::list_records::<R>(campaign_id, &*state.records).await?;
    Ok(Json(records))
}

/// POST /{campaign_id}/{collection}
#[instrument(skip(state, record), fields(collection = %R::COLLECTION))]
async fn add_record<R: CampaignRecord>(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Json(record): Json<R>,
) -> Result<Json<RecordView<R>>, ApiError> {
    let command = commands::AddRecord {
        correlation_id: Uuid::new_v4(),
        campaign_id,
        record,
    };

    info!(correlation_id = %command.correlation_id, "handling add_record command");

    let view =
        command_handlers::handle_add_record(&command, state.clock.as_ref(), &*state.records)
            .await?;

    Ok(Json(view))
}

/// GET /{campaign_id}/{collection}/{record_id}
#[instrument(skip(state), fields(collection = %R::COLLECTION))]
async fn get_record<R: CampaignRecord>(
    State(state): State<AppState>,
    Path((campaign_id, record_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RecordView<R>>, ApiError> {
    let view = query_handlers::get_record::<R>(campaign_id, record_id, &*state.records).await?;
    Ok(Json(view))
}

/// PATCH /{campaign_id}/{collection}/{record_id}
#[instrument(skip(state, changes), fields(collection = %R::COLLECTION))]
async fn update_record<R: CampaignRecord>(
    State(state): State<AppState>,
    Path((campaign_id, record_id)): Path<(Uuid, Uuid)>,
    Json(changes): Json<Map<String, Value>>,
) -> Result<Json<RecordView<R>>, ApiError> {
    let command = commands::UpdateRecord::<R>::new(Uuid::new_v4(), campaign_id, record_id, changes);

    info!(correlation_id = %command.correlation_id, "handling update_record command");

    let view =
        command_handlers::handle_update_record(&command, state.clock.as_ref(), &*state.records)
            .await?;

    Ok(Json(view))
}

/// DELETE /{campaign_id}/{collection}/{record_id}
#[instrument(skip(state), fields(collection = %R::COLLECTION))]
async fn delete_record<R: CampaignRecord>(
    State(state): State<AppState>,
    Path((campaign_id, record_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteRecord {
        correlation_id: Uuid::new_v4(),
        campaign_id,
        collection: R::COLLECTION,
        record_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_record command");

    command_handlers::handle_delete_record(&command, &*state.records).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn collection<R: CampaignRecord>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_records::<R>).post(add_record::<R>))
        .route(
            "/{record_id}",
            get(get_record::<R>)
                .patch(update_record::<R>)
                .delete(delete_record::<R>),
        )
}

/// Returns the router for the record collections.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/{campaign_id}/characters", collection::<Character>())
        .nest("/{campaign_id}/npcs", collection::<Npc>())
        .nest("/{campaign_id}/lore", collection::<LoreEntry>())
        .nest("/{campaign_id}/sessions", collection::<Session>())
        .nest("/{campaign_id}/encounters", collection::<Encounter>())
        .nest("/{campaign_id}/locations", collection::<Location>())
        .nest("/{campaign_id}/timeline-events", collection::<TimelineEvent>())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{
        CannedGenerator, Fakes, empty_request, json_request, read_json, state_with,
    };

    fn app() -> Router {
        router().with_state(state_with(
            Fakes::default(),
            Arc::new(CannedGenerator::replying("")),
        ))
    }

    #[tokio::test]
    async fn test_add_npc_returns_record_with_id_and_timestamps() {
        // Arrange
        let app = app();
        let campaign_id = Uuid::new_v4();

        // Act
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/{campaign_id}/npcs"),
                &json!({ "name": "Mira", "role": "innkeeper" }),
            ))
            .await
            .unwrap();

        // Assert
        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Mira");
        assert_eq!(json["campaignId"], campaign_id.to_string());
        assert_eq!(json["createdAt"], json["updatedAt"]);
        Uuid::parse_str(json["id"].as_str().unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_add_invalid_record_returns_400() {
        let app = app();

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/{}/lore", Uuid::new_v4()),
                &json!({ "title": "" }),
            ))
            .await
            .unwrap();

        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_sessions_are_numbered_in_order() {
        // Arrange
        let app = app();
        let campaign_id = Uuid::new_v4();
        let uri = format!("/{campaign_id}/sessions");

        // Act
        for title in ["Session Zero", "The Docks"] {
            let response = app
                .clone()
                .oneshot(json_request("POST", &uri, &json!({ "title": title })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();

        // Assert
        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::OK);
        let numbers: Vec<u64> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["number"].as_u64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_update_merges_fields_and_keeps_id() {
        // Arrange
        let app = app();
        let campaign_id = Uuid::new_v4();
        let created = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/{campaign_id}/locations"),
                &json!({ "name": "Saltmarsh", "type": "town" }),
            ))
            .await
            .unwrap();
        let (_, created) = read_json(created).await;
        let record_id = created["id"].as_str().unwrap().to_owned();

        // Act
        let response = app
            .oneshot(json_request(
                "PATCH",
                &format!("/{campaign_id}/locations/{record_id}"),
                &json!({ "region": "The Drowned Coast", "id": Uuid::new_v4() }),
            ))
            .await
            .unwrap();

        // Assert
        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["id"], record_id);
        assert_eq!(json["name"], "Saltmarsh");
        assert_eq!(json["region"], "The Drowned Coast");
    }

    #[tokio::test]
    async fn test_delete_then_get_returns_404() {
        // Arrange
        let app = app();
        let campaign_id = Uuid::new_v4();
        let created = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/{campaign_id}/timeline-events"),
                &json!({ "title": "The Flood" }),
            ))
            .await
            .unwrap();
        let (_, created) = read_json(created).await;
        let uri = format!(
            "/{campaign_id}/timeline-events/{}",
            created["id"].as_str().unwrap()
        );

        // Act
        let deleted = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        let fetched = app.oneshot(empty_request("GET", &uri)).await.unwrap();

        // Assert
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        let (status, json) = read_json(fetched).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "record_not_found");
    }

    #[tokio::test]
    async fn test_delete_unknown_record_returns_404() {
        let app = app();

        let response = app
            .oneshot(empty_request(
                "DELETE",
                &format!("/{}/encounters/{}", Uuid::new_v4(), Uuid::new_v4()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
