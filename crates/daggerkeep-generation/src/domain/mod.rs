//! Domain layer: providers and credentials, prompts, generated content and
//! the collaborator ports the orchestrator drives.

pub mod content;
pub mod credentials;
pub mod outcome;
pub mod ports;
pub mod prompt;
