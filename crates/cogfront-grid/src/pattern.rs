//! Tile pattern checker behind the board easter egg.

use serde::{Deserialize, Serialize};

use cogfront_core::config::TilePatternConfig;
use cogfront_core::enums::PartKind;
use cogfront_core::types::CellKey;

use crate::board::Board;
use crate::parts::PartRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilePattern {
    cells: Vec<CellKey>,
    kind: PartKind,
    pub scene: String,
    found: bool,
}

impl TilePattern {
    pub fn new(config: &TilePatternConfig) -> Self {
        Self {
            cells: config.cells.clone(),
            kind: config.kind,
            scene: config.scene.clone(),
            found: false,
        }
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Every listed cell exists and holds a part of the pattern kind.
    pub fn matches(&self, board: &Board, parts: &PartRegistry) -> bool {
        !self.cells.is_empty()
            && self.cells.iter().all(|key| {
                board
                    .occupant(*key)
                    .and_then(|id| parts.kind(id))
                    .is_some_and(|kind| kind == self.kind)
            })
    }

    /// True exactly once: the first time the pattern matches.
    pub fn check(&mut self, board: &Board, parts: &PartRegistry) -> bool {
        if self.found {
            return false;
        }
        self.found = self.matches(board, parts);
        self.found
    }
}
