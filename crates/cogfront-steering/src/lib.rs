//! Steering for COGFRONT agents.
//!
//! Force-based movement primitives (seek, flee, wander, arrive, orbit and
//! evenly spaced orbit) plus the fixed-tick integrator. No ECS dependency:
//! everything operates on a plain [`Agent`].

pub mod agent;
pub mod request;

pub use agent::Agent;
pub use cogfront_core as core;
pub use request::{combine, SteeringRequest};
