//! Route modules organized by bounded context.

use axum::Router;

use crate::state::AppState;

pub mod campaigns;
pub mod dice;
pub mod files;
pub mod generation;
pub mod health;
pub mod records;
pub mod settings;
pub mod wizard;

/// Assembles every route under its prefix and attaches `state`.
pub fn app(state: AppState) -> Router {
    let campaigns = campaigns::router()
        .merge(records::router())
        .merge(files::router())
        .merge(wizard::router())
        .merge(generation::router())
        .merge(dice::router());

    Router::new()
        .merge(health::router())
        .nest("/api/v1/campaigns", campaigns)
        .nest("/api/v1/settings", settings::router())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use chrono::{TimeZone, Utc};
    use daggerkeep_core::clock::Clock;
    use daggerkeep_core::error::DomainError;
    use daggerkeep_core::repository::{BlobStore, KeyValueStore, RecordRepository};
    use daggerkeep_core::rng::DeterministicRng;
    use daggerkeep_generation::domain::credentials::Provider;
    use daggerkeep_generation::domain::ports::TextGenerator;
    use daggerkeep_test_support::{
        FixedClock, InMemoryBlobStore, InMemoryKeyValueStore, InMemoryRecordRepository,
        SequenceRng,
    };
    use serde_json::Value;

    use crate::state::AppState;

    /// Generator that always returns the same reply and counts calls.
    pub(crate) struct CannedGenerator {
        reply: Result<String, String>,
        calls: Mutex<Vec<(Provider, String)>>,
    }

    impl CannedGenerator {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_owned()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_owned()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Provider and key of every call so far.
        pub(crate) fn calls(&self) -> Vec<(Provider, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            provider: Provider,
            api_key: &str,
            _prompt: &str,
        ) -> Result<String, DomainError> {
            self.calls
                .lock()
                .unwrap()
                .push((provider, api_key.to_owned()));
            self.reply.clone().map_err(DomainError::Generation)
        }
    }

    /// In-memory collaborators for route tests.
    pub(crate) struct Fakes {
        pub records: Arc<dyn RecordRepository>,
        pub store: Arc<dyn KeyValueStore>,
        pub blobs: Arc<dyn BlobStore>,
        pub rng: SequenceRng,
    }

    impl Default for Fakes {
        fn default() -> Self {
            Self {
                records: Arc::new(InMemoryRecordRepository::new()),
                store: Arc::new(InMemoryKeyValueStore::new()),
                blobs: Arc::new(InMemoryBlobStore::new()),
                rng: SequenceRng::new(vec![]),
            }
        }
    }

    pub(crate) fn state_with(fakes: Fakes, generator: Arc<dyn TextGenerator>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ));
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(fakes.rng));
        AppState::new(clock, rng, fakes.records, fakes.store, fakes.blobs, generator)
    }

    pub(crate) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    pub(crate) fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub(crate) async fn read_json(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, json)
    }
}
