//! Domain layer: record types, commands and game rules.

pub mod campaign;
pub mod commands;
pub mod daggerheart;
pub mod dice;
pub mod records;
