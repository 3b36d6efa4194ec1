//! ECS components for entities that live in the hecs world.
//!
//! Drones carry a steering `Agent` alongside [`Drone`]; projectiles carry
//! [`Position`], [`Velocity`] and [`Projectile`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use cogfront_core::enums::{DroneState, PartKind, ProjectileKind};
use cogfront_core::types::PartId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// A member of the drone swarm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub state: DroneState,
    /// Slot in the evenly spaced orbit.
    pub index: usize,
    pub count: usize,
    /// Hits left before the drone is destroyed.
    pub hits: u32,
    /// Seconds since the last shot.
    pub since_shot: f32,
}

impl Drone {
    pub fn new(hits: u32) -> Self {
        Self {
            state: DroneState::Waiting,
            index: 0,
            count: 1,
            hits,
            since_shot: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub radius: f32,
    /// Parts this projectile already passed through.
    pub struck: Vec<PartId>,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, radius: f32) -> Self {
        Self {
            kind,
            radius,
            struck: Vec::new(),
        }
    }
}

/// Kind of the captured part a flung projectile was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carried(pub PartKind);
