//! Part entities and the registry that owns them.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use cogfront_core::enums::PartKind;
use cogfront_core::health::{DamageResult, Health};
use cogfront_core::state::{PartLocation, PartView};
use cogfront_core::types::{heading, PartId};

/// Power bookkeeping for gear-family parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerCache {
    pub powered: bool,
    /// Powered neighbors seen when this part powered up.
    pub neighbors: Vec<PartId>,
    /// Board-local position recorded when this part powered up.
    pub anchor: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub kind: PartKind,
    /// True only while the part sits in a board cell.
    pub placed: bool,
    pub location: PartLocation,
    /// World position, kept in sync by whichever surface holds the part.
    pub position: Vec2,
    /// Facing in degrees relative to the holding surface. 0 faces +y.
    pub rotation: f32,
    pub health: Option<Health>,
    pub power: PowerCache,
    /// Turret charge timer in seconds.
    pub charge: f32,
}

impl Part {
    pub fn new(id: PartId, kind: PartKind, health: Option<f32>) -> Self {
        Self {
            id,
            kind,
            placed: false,
            location: PartLocation::Loose,
            position: Vec2::ZERO,
            rotation: 0.0,
            health: health.map(Health::new),
            power: PowerCache::default(),
            charge: 0.0,
        }
    }

    /// Powered as seen by neighbors. Only gear-family parts can be powered.
    pub fn is_powered(&self) -> bool {
        self.kind.is_gear_family() && self.power.powered
    }

    /// Drop power and forget cached neighbors.
    pub fn depower(&mut self) {
        self.power.powered = false;
        self.power.neighbors.clear();
    }

    /// Unit vector the part faces, given the rotation of its surface.
    pub fn facing(&self, surface_rotation: f32) -> Vec2 {
        heading(surface_rotation + self.rotation + 90.0)
    }

    /// Turn the part in place. Gears and sources refuse.
    pub fn try_rotate(&mut self, degrees: f32) -> bool {
        if !self.kind.can_rotate() {
            return false;
        }
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
        true
    }

    /// Apply damage. Parts without health are indestructible.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        match self.health.as_mut() {
            Some(health) => health.take_damage(amount),
            None => DamageResult::Alive,
        }
    }

    pub fn view(&self) -> PartView {
        PartView {
            id: self.id,
            kind: self.kind,
            position: self.position,
            rotation: self.rotation,
            placed: self.placed,
            powered: self.is_powered(),
            location: self.location,
            health: self.health.map(|h| h.current()),
        }
    }
}

/// Owns every part. Iteration is in ascending id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartRegistry {
    parts: BTreeMap<PartId, Part>,
    next_id: u32,
}

impl PartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loose part and return its id.
    pub fn spawn(&mut self, kind: PartKind, health: Option<f32>) -> PartId {
        let id = PartId(self.next_id);
        self.next_id += 1;
        self.parts.insert(id, Part::new(id, kind, health));
        id
    }

    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.get(&id)
    }

    pub fn get_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.get_mut(&id)
    }

    pub fn contains(&self, id: PartId) -> bool {
        self.parts.contains_key(&id)
    }

    /// Remove a part. Surfaces must drop their reference separately.
    pub fn remove(&mut self, id: PartId) -> Option<Part> {
        self.parts.remove(&id)
    }

    pub fn is_powered(&self, id: PartId) -> bool {
        self.parts.get(&id).is_some_and(Part::is_powered)
    }

    pub fn kind(&self, id: PartId) -> Option<PartKind> {
        self.parts.get(&id).map(|p| p.kind)
    }

    pub fn ids(&self) -> Vec<PartId> {
        self.parts.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Part> {
        self.parts.values_mut()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn views(&self) -> Vec<PartView> {
        self.parts.values().map(Part::view).collect()
    }
}
