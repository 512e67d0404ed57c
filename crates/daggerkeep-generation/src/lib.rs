//! Daggerkeep — Content Generation bounded context.
//!
//! Turns a completed campaign frame into starter content. A single request
//! to an AI provider (Anthropic or OpenAI) returns NPCs, locations, lore,
//! encounters and timeline events, which are then saved one at a time into
//! the campaign's collections with progress reported along the way.

pub mod application;
pub mod domain;
pub mod infrastructure;
