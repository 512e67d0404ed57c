//! Routes for uploaded campaign files.
//!
//! Uploads send the file as the raw request body with its name in the query
//! string; downloads return the stored bytes with the recorded content type.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use daggerkeep_campaign::application::files;
use daggerkeep_campaign::application::query_handlers::RecordView;
use daggerkeep_campaign::domain::commands;
use daggerkeep_campaign::domain::records::CampaignFile;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const DEFAULT_UPLOADER: &str = "DM";

/// Query parameters for POST /{campaign_id}/files.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    /// File name to store.
    pub name: String,
    /// Display name of the uploader.
    #[serde(default)]
    pub uploaded_by: Option<String>,
}

/// POST /{campaign_id}/files
#[instrument(skip(state, headers, body), fields(name = %query.name, size = body.len()))]
async fn upload_file(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RecordView<CampaignFile>>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_owned();
    let command = commands::UploadFile {
        correlation_id: Uuid::new_v4(),
        campaign_id,
        name: query.name,
        content_type,
        uploaded_by: query
            .uploaded_by
            .unwrap_or_else(|| DEFAULT_UPLOADER.to_owned()),
        bytes: body.to_vec(),
    };

    info!(correlation_id = %command.correlation_id, "handling upload_file command");

    let view = files::handle_upload_file(
        &command,
        state.clock.as_ref(),
        &*state.records,
        &*state.blobs,
    )
    .await?;

    Ok(Json(view))
}

/// GET /{campaign_id}/files
#[instrument(skip(state))]
async fn list_files(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Vec<RecordView<CampaignFile>>>, ApiError> {
    let files = files::list_files(campaign_id, &*state.records).await?;
    Ok(Json(files))
}

/// GET /{campaign_id}/files/{file_id}
#[instrument(skip(state))]
async fn download_file(
    State(state): State<AppState>,
    Path((campaign_id, file_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let (file, bytes) =
        files::download_file(campaign_id, file_id, &*state.records, &*state.blobs).await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.record.name.replace('"', "")
    );
    Ok((
        [
            (header::CONTENT_TYPE, file.record.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// DELETE /{campaign_id}/files/{file_id}
#[instrument(skip(state))]
async fn delete_file(
    State(state): State<AppState>,
    Path((campaign_id, file_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let command = commands::DeleteFile {
        correlation_id: Uuid::new_v4(),
        campaign_id,
        file_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_file command");

    files::handle_delete_file(&command, &*state.records, &*state.blobs).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for campaign files.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{campaign_id}/files",
            get(list_files)
                .post(upload_file)
                .layer(DefaultBodyLimit::max(files::MAX_FILE_SIZE * 2)),
        )
        .route(
            "/{campaign_id}/files/{file_id}",
            get(download_file).delete(delete_file),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use daggerkeep_core::repository::BlobStore;
    use daggerkeep_test_support::InMemoryBlobStore;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{
        CannedGenerator, Fakes, empty_request, read_json, state_with,
    };

    fn upload_request(campaign_id: Uuid, name: &str, bytes: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/{campaign_id}/files?name={name}"))
            .header("content-type", "text/plain")
            .body(Body::from(bytes))
            .unwrap()
    }

    fn app_with_blobs(blobs: Arc<InMemoryBlobStore>) -> Router {
        let fakes = Fakes {
            blobs,
            ..Fakes::default()
        };
        router().with_state(state_with(fakes, Arc::new(CannedGenerator::replying(""))))
    }

    #[tokio::test]
    async fn test_upload_list_download_delete() {
        // Arrange
        let blobs = Arc::new(InMemoryBlobStore::new());
        let app = app_with_blobs(Arc::clone(&blobs));
        let campaign_id = Uuid::new_v4();

        // Act: upload
        let response = app
            .clone()
            .oneshot(upload_request(campaign_id, "map.txt", b"here be dragons".to_vec()))
            .await
            .unwrap();

        // Assert: metadata recorded and blob stored
        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "map.txt");
        assert_eq!(json["size"], 15);
        assert_eq!(json["contentType"], "text/plain");
        assert_eq!(json["uploadedBy"], "DM");
        let file_id = json["id"].as_str().unwrap().to_owned();
        let path = json["path"].as_str().unwrap().to_owned();
        assert!(path.starts_with(&format!("campaigns/{campaign_id}/files/")));
        assert!(blobs.get(&path).await.unwrap().is_some());

        // Act: list and download
        let listed = app
            .clone()
            .oneshot(empty_request("GET", &format!("/{campaign_id}/files")))
            .await
            .unwrap();
        let downloaded = app
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/{campaign_id}/files/{file_id}"),
            ))
            .await
            .unwrap();

        // Assert
        let (_, listed) = read_json(listed).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(downloaded.status(), StatusCode::OK);
        assert_eq!(downloaded.headers()[header::CONTENT_TYPE], "text/plain");
        let body = axum::body::to_bytes(downloaded.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"here be dragons");

        // Act: delete
        let deleted = app
            .oneshot(empty_request(
                "DELETE",
                &format!("/{campaign_id}/files/{file_id}"),
            ))
            .await
            .unwrap();

        // Assert
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        assert!(blobs.get(&path).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upload_oversized_file_returns_400() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let app = app_with_blobs(Arc::clone(&blobs));

        let response = app
            .oneshot(upload_request(
                Uuid::new_v4(),
                "huge.bin",
                vec![0; files::MAX_FILE_SIZE + 1],
            ))
            .await
            .unwrap();

        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
        assert!(blobs.paths().is_empty());
    }

    #[tokio::test]
    async fn test_download_unknown_file_returns_404() {
        let app = app_with_blobs(Arc::new(InMemoryBlobStore::new()));

        let response = app
            .oneshot(empty_request(
                "GET",
                &format!("/{}/files/{}", Uuid::new_v4(), Uuid::new_v4()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
