//! Headless BULWARK host.
//!
//! Wires the session to a scripted input reader, runs it for a fixed number
//! of frames and summarizes the outcome. Rendering is left to other hosts;
//! this crate only drives the simulation and logs what happens.

pub mod demo;
pub mod game_loop;
pub mod input;

pub use bulwark_core as core;
