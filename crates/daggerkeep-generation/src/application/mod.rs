//! Application layer: the generation orchestrator and credential handlers.

pub mod credentials;
pub mod orchestrator;
pub mod progress;
pub mod sink;
