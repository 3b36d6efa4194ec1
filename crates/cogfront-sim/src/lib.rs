//! Simulation engine for COGFRONT.
//!
//! Owns the hecs ECS world, the placement board, the active boss and the
//! lifecycle director, runs all systems at a fixed tick rate, and produces
//! `GameStateSnapshot`s for the runner.

pub mod animator;
pub mod bosses;
pub mod components;
pub mod engine;
pub mod lifecycle;
pub mod player;
pub mod scene;
pub mod sequence;
pub mod systems;
pub mod world_setup;

pub use cogfront_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
