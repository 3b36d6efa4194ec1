//! Placement grid and power routing for COGFRONT.
//!
//! Parts live in a [`PartRegistry`] keyed by stable [`PartId`]s. Boards and
//! conveyor belts are [`PlaceableSurface`]s that hold part ids in cells.
//! [`power::propagate`] re-derives which gears are energized once per tick,
//! and [`turret`] decides which turrets charge and fire.
//!
//! [`PartId`]: cogfront_core::types::PartId

pub mod board;
pub mod conveyor;
pub mod parts;
pub mod pattern;
pub mod power;
pub mod reserve;
pub mod surface;
pub mod turret;

pub use board::Board;
pub use cogfront_core as core;
pub use conveyor::{ConveyorBelt, ShuffleBag};
pub use parts::{Part, PartRegistry};
pub use surface::PlaceableSurface;

#[cfg(test)]
mod tests;
