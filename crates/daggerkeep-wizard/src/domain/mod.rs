//! Domain layer: the campaign frame, step table, wizard state and commands.

pub mod commands;
pub mod draft;
pub mod frame;
pub mod progress;
pub mod steps;
