//! The placement board: a rotatable grid of cells holding at most one part each.
//!
//! Cells and adjacency probes live in board-local space, so rotating the
//! board carries its parts along without disturbing their neighborhoods.

use std::collections::BTreeMap;

use glam::Vec2;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use cogfront_core::config::BoardConfig;
use cogfront_core::constants::GEAR_MOVE_EPSILON;
use cogfront_core::health::DamageResult;
use cogfront_core::state::PartLocation;
use cogfront_core::types::{rotate, CellKey, PartId};

use crate::parts::PartRegistry;
use crate::surface::PlaceableSurface;

/// Board pose: world position of the board center and rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardTransform {
    pub origin: Vec2,
    pub rotation: f32,
}

impl BoardTransform {
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.origin + rotate(local, self.rotation)
    }

    pub fn to_local(&self, world: Vec2) -> Vec2 {
        rotate(world - self.origin, -self.rotation)
    }
}

/// Result of damaging a placed part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartHit {
    Survived,
    Destroyed,
    /// No such part on this board.
    Missed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub transform: BoardTransform,
    cell_size: f32,
    check_radius: f32,
    move_epsilon: f32,
    /// Local position of cell (0, 0) relative to the board center.
    corner: Vec2,
    cells: BTreeMap<CellKey, Option<PartId>>,
    destroy_options: Vec<CellKey>,
}

impl Board {
    /// Build a `rows` x `columns` board whose cell (0, 0) sits at `cell_zero` in world space.
    pub fn new(rows: i32, columns: i32, cell_size: f32, cell_zero: Vec2) -> Self {
        let corner = -Vec2::new((columns - 1) as f32, (rows - 1) as f32) * cell_size * 0.5;
        let mut cells = BTreeMap::new();
        for row in 0..rows {
            for col in 0..columns {
                cells.insert(CellKey::new(row, col), None);
            }
        }
        let destroy_options = cells.keys().copied().collect();
        Self {
            transform: BoardTransform {
                origin: cell_zero - corner,
                rotation: 0.0,
            },
            cell_size,
            check_radius: cell_size,
            move_epsilon: GEAR_MOVE_EPSILON,
            corner,
            cells,
            destroy_options,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        let mut board = Self::new(config.rows, config.columns, config.cell_size, config.origin);
        board.check_radius = config.check_radius;
        board.move_epsilon = config.move_epsilon;
        board
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn move_epsilon(&self) -> f32 {
        self.move_epsilon
    }

    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn has_cell(&self, key: CellKey) -> bool {
        self.cells.contains_key(&key)
    }

    pub fn cell_keys(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.cells.keys().copied()
    }

    /// Occupied cells in key order.
    pub fn occupied(&self) -> impl Iterator<Item = (CellKey, PartId)> + '_ {
        self.cells
            .iter()
            .filter_map(|(key, slot)| slot.map(|id| (*key, id)))
    }

    pub fn occupant(&self, key: CellKey) -> Option<PartId> {
        self.cells.get(&key).copied().flatten()
    }

    pub fn cell_of(&self, part: PartId) -> Option<CellKey> {
        self.occupied().find(|(_, id)| *id == part).map(|(key, _)| key)
    }

    pub fn cell_local(&self, key: CellKey) -> Vec2 {
        self.corner + Vec2::new(key.col as f32, key.row as f32) * self.cell_size
    }

    pub fn cell_world(&self, key: CellKey) -> Vec2 {
        self.transform.to_world(self.cell_local(key))
    }

    /// Existing cell whose square contains the board-local point.
    pub fn cell_at_local(&self, local: Vec2) -> Option<CellKey> {
        let grid = (local - self.corner) / self.cell_size;
        let key = CellKey::new(grid.y.round() as i32, grid.x.round() as i32);
        self.cells.contains_key(&key).then_some(key)
    }

    pub fn cell_at(&self, world: Vec2) -> Option<CellKey> {
        self.cell_at_local(self.transform.to_local(world))
    }

    /// Board-local position of a placed part.
    pub fn local_position(&self, part: PartId) -> Option<Vec2> {
        self.cell_of(part).map(|key| self.cell_local(key))
    }

    /// Put a free part into an empty cell.
    pub fn place_in_cell(&mut self, parts: &mut PartRegistry, part: PartId, key: CellKey) -> bool {
        let Some(slot) = self.cells.get(&key) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        let world = self.cell_world(key);
        let Some(p) = parts.get_mut(part) else {
            warn!("place: unknown part {part:?}");
            return false;
        };
        if matches!(
            p.location,
            PartLocation::Board(_) | PartLocation::Conveyor { .. }
        ) {
            warn!("place: part {part:?} is already on a surface");
            return false;
        }
        p.placed = true;
        p.location = PartLocation::Board(key);
        p.position = world;
        self.cells.insert(key, Some(part));
        debug!("placed {:?} {part:?} at {key:?}", p.kind);
        true
    }

    /// Take the part out of a cell, leaving it loose.
    pub fn take_from_cell(&mut self, parts: &mut PartRegistry, key: CellKey) -> Option<PartId> {
        let id = self.cells.get_mut(&key)?.take()?;
        if let Some(p) = parts.get_mut(id) {
            p.placed = false;
            p.location = PartLocation::Loose;
        }
        debug!("picked up {id:?} from {key:?}");
        Some(id)
    }

    /// Forget a part without touching the registry.
    pub fn release(&mut self, part: PartId) -> Option<CellKey> {
        let key = self.cell_of(part)?;
        self.cells.insert(key, None);
        Some(key)
    }

    /// Four orthogonal neighbors probed at `check_radius` in board-local space.
    pub fn neighbor_cells(&self, key: CellKey) -> Vec<CellKey> {
        let center = self.cell_local(key);
        let r = self.check_radius;
        [
            Vec2::new(0.0, r),
            Vec2::new(0.0, -r),
            Vec2::new(-r, 0.0),
            Vec2::new(r, 0.0),
        ]
        .into_iter()
        .filter_map(|offset| self.cell_at_local(center + offset))
        .filter(|neighbor| *neighbor != key)
        .collect()
    }

    pub fn adjacent_parts(&self, key: CellKey) -> Vec<PartId> {
        self.neighbor_cells(key)
            .into_iter()
            .filter_map(|n| self.occupant(n))
            .collect()
    }

    /// Powered gear-family parts next to `key`.
    pub fn adjacent_powered(&self, parts: &PartRegistry, key: CellKey) -> Vec<PartId> {
        self.adjacent_parts(key)
            .into_iter()
            .filter(|id| parts.is_powered(*id))
            .collect()
    }

    /// Occupied cells over existing cells.
    pub fn boss_ratio(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.occupied().count() as f32 / self.cells.len() as f32
    }

    /// Placed part with the greatest world x. Ties go to the lowest id.
    pub fn rightmost_part(&self, parts: &PartRegistry) -> Option<PartId> {
        let mut best: Option<(f32, PartId)> = None;
        for (_, id) in self.occupied() {
            let Some(part) = parts.get(id) else { continue };
            let x = part.position.x;
            let better = match best {
                None => true,
                Some((best_x, best_id)) => x > best_x || (x == best_x && id < best_id),
            };
            if better {
                best = Some((x, id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Remaining cells the laser may still destroy.
    pub fn destroy_options(&self) -> &[CellKey] {
        &self.destroy_options
    }

    /// Pick a cell to destroy: the first option holding a part, else a random one.
    pub fn take_destroy_option<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<CellKey> {
        let cells = &self.cells;
        self.destroy_options.retain(|key| cells.contains_key(key));
        if self.destroy_options.is_empty() {
            return None;
        }
        let index = self
            .destroy_options
            .iter()
            .position(|key| self.occupant(*key).is_some())
            .unwrap_or_else(|| rng.gen_range(0..self.destroy_options.len()));
        Some(self.destroy_options.remove(index))
    }

    /// Remove a cell for good, destroying its occupant. Returns the destroyed part.
    pub fn destroy_cell(&mut self, parts: &mut PartRegistry, key: CellKey) -> Option<PartId> {
        let occupant = self.cells.remove(&key).flatten();
        self.destroy_options.retain(|k| *k != key);
        debug!("destroyed cell {key:?}");
        if let Some(id) = occupant {
            parts.remove(id);
        }
        occupant
    }

    /// Damage a placed part; a depleted part leaves the board and the registry.
    pub fn damage_part(&mut self, parts: &mut PartRegistry, part: PartId, amount: f32) -> PartHit {
        if self.cell_of(part).is_none() {
            return PartHit::Missed;
        }
        let Some(p) = parts.get_mut(part) else {
            warn!("damage: unknown part {part:?}");
            return PartHit::Missed;
        };
        match p.take_damage(amount) {
            DamageResult::Alive => PartHit::Survived,
            DamageResult::Depleted => {
                self.release(part);
                parts.remove(part);
                debug!("part {part:?} destroyed");
                PartHit::Destroyed
            }
        }
    }

    /// Rotate the board about its center, carrying placed parts along.
    pub fn set_rotation(&mut self, parts: &mut PartRegistry, degrees: f32) {
        self.transform.rotation = degrees;
        self.sync_positions(parts);
    }

    pub fn sync_positions(&self, parts: &mut PartRegistry) {
        for (key, id) in self.occupied() {
            if let Some(p) = parts.get_mut(id) {
                p.position = self.cell_world(key);
            }
        }
    }
}

impl PlaceableSurface for Board {
    fn has_cell_at(&self, at: Vec2) -> bool {
        self.cell_at(at).is_some()
    }

    fn pick_up(&mut self, parts: &mut PartRegistry, at: Vec2) -> Option<PartId> {
        let key = self.cell_at(at)?;
        self.take_from_cell(parts, key)
    }

    fn place(&mut self, parts: &mut PartRegistry, part: PartId, at: Vec2) -> bool {
        match self.cell_at(at) {
            Some(key) => self.place_in_cell(parts, part, key),
            None => false,
        }
    }

    fn cell_center(&self, at: Vec2) -> Option<Vec2> {
        self.cell_at(at).map(|key| self.cell_world(key))
    }
}
