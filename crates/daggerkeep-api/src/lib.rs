//! Daggerkeep API — HTTP surface of the campaign companion.
//!
//! Routes are grouped by bounded context under `/api/v1`. Handlers build a
//! command, call the owning crate's handler with the collaborators held in
//! [`state::AppState`], and map domain errors through [`error::ApiError`].

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
