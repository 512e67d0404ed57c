//! Daggerkeep Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that every campaign
//! context depends on: time, randomness, commands, errors, and the
//! persistence collaborator contracts. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod record;
pub mod repository;
pub mod rng;
