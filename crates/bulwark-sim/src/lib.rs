//! Simulation service and session controller for BULWARK.
//!
//! `SimulationService` owns the game state and advances it one tick at a
//! time, returning a `SimulationStepResult`. `GameSession` wraps it with
//! input, ability selection and the command queue. Completely headless.

pub mod engine;
pub mod selection;
pub mod session;
pub mod systems;

pub use bulwark_core as core;
pub use engine::SimulationService;
pub use session::{GameSession, SessionConfig};
