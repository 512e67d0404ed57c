//! Daggerkeep — Campaign Collections bounded context.
//!
//! Responsible for campaign metadata, the per-campaign entity collections
//! (characters, NPCs, lore, sessions, encounters, locations, timeline
//! events), uploaded files, and the duality dice roller.

pub mod application;
pub mod domain;
