//! Daggerkeep API server entry point.

use std::sync::{Arc, Mutex};

use daggerkeep_api::config::Config;
use daggerkeep_api::error::AppError;
use daggerkeep_api::routes;
use daggerkeep_api::state::AppState;
use daggerkeep_api::telemetry;
use daggerkeep_core::clock::SystemClock;
use daggerkeep_core::rng::SystemRng;
use daggerkeep_generation::infrastructure::http_text_generator::HttpTextGenerator;
use daggerkeep_store::fs_blob_store::FsBlobStore;
use daggerkeep_store::pg_key_value_store::PgKeyValueStore;
use daggerkeep_store::pg_record_repository::PgRecordRepository;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!("Starting Daggerkeep API server");

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(Mutex::new(SystemRng::new())),
        Arc::new(PgRecordRepository::new(pool.clone())),
        Arc::new(PgKeyValueStore::new(pool)),
        Arc::new(FsBlobStore::new(config.blob_root.clone())),
        Arc::new(HttpTextGenerator::new(config.providers.clone())),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr()?;
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    telemetry::shutdown(tracer_provider);
    Ok(())
}
