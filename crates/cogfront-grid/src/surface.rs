//! Surfaces the player can pick parts up from and place parts onto.

use glam::Vec2;

use cogfront_core::types::PartId;

use crate::parts::PartRegistry;

pub trait PlaceableSurface {
    /// Whether `at` lies over one of this surface's cells.
    fn has_cell_at(&self, at: Vec2) -> bool;

    /// Detach the part under `at`. `None` when the cell is empty or missing.
    fn pick_up(&mut self, parts: &mut PartRegistry, at: Vec2) -> Option<PartId>;

    /// Attach `part` to the empty cell under `at`. Returns false and changes
    /// nothing when there is no cell or the cell is occupied.
    fn place(&mut self, parts: &mut PartRegistry, part: PartId, at: Vec2) -> bool;

    /// World-space center of the cell under `at`.
    fn cell_center(&self, at: Vec2) -> Option<Vec2>;
}
