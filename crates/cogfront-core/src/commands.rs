//! Player commands sent from the runner to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Set the movement input. Zero stops the player.
    Move { direction: Vec2 },
    /// Pick up from, or place onto, whichever surface is under `at`.
    Interact { at: Vec2 },
    /// Fire a shot toward a world point.
    Shoot { toward: Vec2 },
    /// Rotate the placed part under `at`.
    RotatePart { at: Vec2, degrees: f32 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
