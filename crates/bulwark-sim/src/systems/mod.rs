//! Systems run by the simulation service each tick.
//!
//! Systems are free functions over `&mut GameState`. They keep no state of
//! their own except the wave progression, which the service owns.

pub mod cleanup;
pub mod drops;
pub mod enemy_behavior;
pub mod player_attack;
pub mod projectiles;
pub mod waves;
