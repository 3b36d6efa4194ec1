//! Game state snapshot: the visible state handed to the runner each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{CellKey, PartId, SimTime};

/// Complete game state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub boss: BossView,
    pub player: PlayerView,
    pub parts: Vec<PartView>,
    pub drones: Vec<DroneView>,
    pub projectiles: usize,
    pub power: Option<PowerReserveView>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossView {
    pub kind: BossKind,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Distress factor in `[0, 1]`.
    pub distress: f32,
    pub phase: BossPhase,
    pub alive: bool,
    /// Current animator state name.
    pub animation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub health: f32,
    pub ammo: u32,
    pub holding: Option<PartId>,
    pub invincible: bool,
    pub active: bool,
}

/// Where a part currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartLocation {
    Board(CellKey),
    Conveyor { belt: usize },
    Held,
    Captured,
    Loose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartView {
    pub id: PartId,
    pub kind: PartKind,
    pub position: Vec2,
    pub rotation: f32,
    pub placed: bool,
    pub powered: bool,
    pub location: PartLocation,
    pub health: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneView {
    pub position: Vec2,
    pub state: DroneState,
    pub index: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerReserveView {
    pub reserve: f32,
    pub goal: f32,
}
