//! Core types and definitions for the BULWARK lane-defense simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! entities, definitions and settings, the game-state aggregate, step-result
//! events, session commands, and constants. It owns no random generator and
//! installs no logging subscriber.

pub mod commands;
pub mod constants;
pub mod definitions;
pub mod entities;
pub mod enums;
pub mod error;
pub mod events;
pub mod fixed_point;
pub mod input;
pub mod settings;
pub mod state;
pub mod types;

pub use error::ConfigError;
pub use types::Float2;

#[cfg(test)]
mod tests;
