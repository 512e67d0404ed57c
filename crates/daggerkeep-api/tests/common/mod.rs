//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use daggerkeep_core::clock::Clock;
use daggerkeep_core::rng::DeterministicRng;
use daggerkeep_generation::infrastructure::http_text_generator::{
    HttpTextGenerator, ProviderConfig,
};
use daggerkeep_store::fs_blob_store::FsBlobStore;
use daggerkeep_store::pg_key_value_store::PgKeyValueStore;
use daggerkeep_store::pg_record_repository::PgRecordRepository;
use daggerkeep_test_support::{FixedClock, SequenceRng};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use daggerkeep_api::routes;
use daggerkeep_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// The full app wired to PostgreSQL, a temporary blob directory and AI
/// providers at `provider_url`.
pub struct TestApp {
    /// The router; clone it per request so wizard sessions are shared.
    pub router: Router,
    /// Blob root, removed when the app is dropped.
    pub blob_dir: TempDir,
}

/// Build the full app with real stores and deterministic Clock/RNG. Uses the
/// same route structure as `main.rs`.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(pool, SequenceRng::new(vec![]), "http://127.0.0.1:9")
}

/// Build the full app with a scripted RNG and provider base URL.
pub fn build_test_app_with(pool: PgPool, rng: SequenceRng, provider_url: &str) -> TestApp {
    let blob_dir = tempfile::tempdir().unwrap();
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let providers = ProviderConfig {
        anthropic_base_url: provider_url.to_owned(),
        openai_base_url: provider_url.to_owned(),
        ..ProviderConfig::default()
    };
    let app_state = AppState::new(
        fixed_clock(),
        rng,
        Arc::new(PgRecordRepository::new(pool.clone())),
        Arc::new(PgKeyValueStore::new(pool)),
        Arc::new(FsBlobStore::new(blob_dir.path())),
        Arc::new(HttpTextGenerator::new(providers)),
    );

    TestApp {
        router: routes::app(app_state),
        blob_dir,
    }
}

/// Send a request with an optional JSON body and return the status and JSON
/// response (`Null` for an empty body).
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: &TestApp,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: &TestApp, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}
