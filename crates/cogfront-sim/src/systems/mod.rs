//! Systems run by the engine each tick.
//!
//! Systems are plain functions over the [`Scene`](crate::scene::Scene).
//! They keep no state of their own.

pub mod cleanup;
pub mod collisions;
pub mod drones;
pub mod movement;
pub mod snapshot;
pub mod turrets;
