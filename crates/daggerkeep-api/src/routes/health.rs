//! Health check endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;
use crate::telemetry::SERVICE_NAME;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{
        CannedGenerator, Fakes, empty_request, read_json, state_with,
    };

    #[tokio::test]
    async fn test_health_reports_service_and_version() {
        let app = router().with_state(state_with(
            Fakes::default(),
            Arc::new(CannedGenerator::replying("")),
        ));

        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

        let (status, json) = read_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "daggerkeep-api");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}
