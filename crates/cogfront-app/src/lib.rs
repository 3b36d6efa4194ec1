//! COGFRONT headless runner.
//!
//! Wires the simulation engine to a paced game-loop thread and to service
//! objects that log what a front end would render or play.

pub mod game_loop;
pub mod services;
pub mod state;

pub use cogfront_core as core;
