//! Daggerkeep — Campaign Builder Wizard bounded context.
//!
//! Tracks a campaign's progress through the fourteen-step campaign frame
//! wizard: field edits, step navigation gated by per-step validation, draft
//! persistence, and one-way completion into the campaign's permanent frame.

pub mod application;
pub mod domain;
