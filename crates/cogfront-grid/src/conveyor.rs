//! Conveyor belts: moving cells fed from a shuffle bag of part kinds.
//!
//! Parts on a belt are never `placed`, so they do not take part in power
//! routing.

use glam::Vec2;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use cogfront_core::config::ConveyorConfig;
use cogfront_core::constants::CELL_SIZE;
use cogfront_core::enums::PartKind;
use cogfront_core::state::PartLocation;
use cogfront_core::types::PartId;

use crate::parts::PartRegistry;
use crate::surface::PlaceableSurface;

/// Draws every item once, in random order, before any repeats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleBag<T: Clone> {
    items: Vec<T>,
    remaining: Vec<T>,
}

impl<T: Clone> ShuffleBag<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            remaining: items.clone(),
            items,
        }
    }

    /// Next item. `None` only when the bag was built empty.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<T> {
        if self.remaining.is_empty() {
            self.remaining = self.items.clone();
        }
        if self.remaining.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.remaining.len());
        Some(self.remaining.swap_remove(index))
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConveyorCell {
    /// Distance travelled along the belt.
    pub offset: f32,
    pub part: Option<PartId>,
}

/// What a belt did during one tick.
#[derive(Debug, Clone, Default)]
pub struct ConveyorTick {
    pub spawned: Option<PartId>,
    /// Parts destroyed with their evicted cells.
    pub evicted: Vec<PartId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConveyorBelt {
    pub index: usize,
    /// Spawn point in world space. The belt runs toward +x.
    pub origin: Vec2,
    speed: f32,
    spawn_interval: f32,
    destroy_distance: f32,
    cell_size: f32,
    part_health: Option<f32>,
    cells: Vec<ConveyorCell>,
    timer: f32,
    running: bool,
    bag: ShuffleBag<PartKind>,
}

impl ConveyorBelt {
    pub fn new(index: usize, origin: Vec2, config: &ConveyorConfig, part_health: Option<f32>) -> Self {
        Self {
            index,
            origin,
            speed: config.speed,
            spawn_interval: config.spawn_interval,
            destroy_distance: config.destroy_distance,
            cell_size: CELL_SIZE,
            part_health,
            cells: Vec::new(),
            timer: 0.0,
            running: false,
            bag: ShuffleBag::new(config.bag.clone()),
        }
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn cells(&self) -> &[ConveyorCell] {
        &self.cells
    }

    pub fn cell_world(&self, cell: &ConveyorCell) -> Vec2 {
        self.origin + Vec2::new(cell.offset, 0.0)
    }

    /// Move cells, evict those past the end, and spawn on the interval.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        parts: &mut PartRegistry,
        rng: &mut R,
        dt: f32,
    ) -> ConveyorTick {
        let mut out = ConveyorTick::default();
        if !self.running {
            return out;
        }

        for cell in &mut self.cells {
            cell.offset += self.speed * dt;
        }
        let limit = self.destroy_distance;
        let (kept, gone): (Vec<_>, Vec<_>) = self.cells.drain(..).partition(|c| c.offset <= limit);
        self.cells = kept;
        for cell in gone {
            if let Some(id) = cell.part {
                parts.remove(id);
                out.evicted.push(id);
            }
        }

        self.timer += dt;
        if self.timer >= self.spawn_interval {
            self.timer = 0.0;
            if let Some(kind) = self.bag.draw(rng) {
                let health = if matches!(kind, PartKind::AmmoRefill) {
                    None
                } else {
                    self.part_health
                };
                let id = parts.spawn(kind, health);
                if let Some(p) = parts.get_mut(id) {
                    p.location = PartLocation::Conveyor { belt: self.index };
                }
                self.cells.push(ConveyorCell {
                    offset: 0.0,
                    part: Some(id),
                });
                out.spawned = Some(id);
                debug!("belt {} spawned {kind:?} {id:?}", self.index);
            }
        }

        self.sync_positions(parts);
        out
    }

    pub fn sync_positions(&self, parts: &mut PartRegistry) {
        for cell in &self.cells {
            if let Some(p) = cell.part.and_then(|id| parts.get_mut(id)) {
                p.position = self.origin + Vec2::new(cell.offset, 0.0);
            }
        }
    }

    /// Forget a part without touching the registry.
    pub fn release(&mut self, part: PartId) -> bool {
        for cell in &mut self.cells {
            if cell.part == Some(part) {
                cell.part = None;
                return true;
            }
        }
        false
    }

    /// Part riding the cell under `at`, if any.
    pub fn part_at(&self, at: Vec2) -> Option<PartId> {
        self.cell_index_at(at).and_then(|index| self.cells[index].part)
    }

    fn cell_index_at(&self, at: Vec2) -> Option<usize> {
        let half = self.cell_size * 0.5;
        self.cells.iter().position(|cell| {
            let d = at - self.cell_world(cell);
            d.x.abs() <= half && d.y.abs() <= half
        })
    }
}

impl PlaceableSurface for ConveyorBelt {
    fn has_cell_at(&self, at: Vec2) -> bool {
        self.cell_index_at(at).is_some()
    }

    fn pick_up(&mut self, parts: &mut PartRegistry, at: Vec2) -> Option<PartId> {
        let index = self.cell_index_at(at)?;
        let id = self.cells[index].part.take()?;
        if let Some(p) = parts.get_mut(id) {
            p.location = PartLocation::Loose;
        }
        Some(id)
    }

    fn place(&mut self, parts: &mut PartRegistry, part: PartId, at: Vec2) -> bool {
        let Some(index) = self.cell_index_at(at) else {
            return false;
        };
        if self.cells[index].part.is_some() {
            return false;
        }
        let world = self.cell_world(&self.cells[index]);
        let Some(p) = parts.get_mut(part) else {
            return false;
        };
        p.location = PartLocation::Conveyor { belt: self.index };
        p.position = world;
        self.cells[index].part = Some(part);
        true
    }

    fn cell_center(&self, at: Vec2) -> Option<Vec2> {
        self.cell_index_at(at)
            .map(|index| self.cell_world(&self.cells[index]))
    }
}
