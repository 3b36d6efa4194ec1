//! Power reserve meter.
//!
//! While the goal gear is powered the goal meter fills. Otherwise the
//! reserve drains, and once it is empty every power source goes dark.

use serde::{Deserialize, Serialize};

use cogfront_core::config::PowerReserveConfig;
use cogfront_core::health::Health;
use cogfront_core::state::PowerReserveView;
use cogfront_core::types::CellKey;

use crate::board::Board;
use crate::parts::PartRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerReserve {
    reserve: Health,
    goal: Health,
    goal_cell: CellKey,
    period: f32,
    timer: f32,
}

impl PowerReserve {
    pub fn new(config: &PowerReserveConfig) -> Self {
        let mut goal = Health::new(config.goal_max);
        goal.take_damage(config.goal_max);
        Self {
            reserve: Health::new(config.reserve_max),
            goal,
            goal_cell: config.goal_cell,
            period: config.period,
            timer: 0.0,
        }
    }

    /// Sources stay powered while any reserve is left.
    pub fn is_online(&self) -> bool {
        !self.reserve.is_depleted()
    }

    pub fn goal_reached(&self) -> bool {
        self.goal.is_full()
    }

    pub fn goal_powered(&self, board: &Board, parts: &PartRegistry) -> bool {
        board
            .occupant(self.goal_cell)
            .is_some_and(|id| parts.is_powered(id))
    }

    /// Step the meters once per period.
    pub fn tick(&mut self, board: &Board, parts: &PartRegistry, dt: f32) {
        self.timer += dt;
        if self.timer < self.period {
            return;
        }
        self.timer = 0.0;
        if self.goal_powered(board, parts) {
            self.goal.heal(1.0);
        } else {
            self.reserve.take_damage(1.0);
        }
    }

    pub fn view(&self) -> PowerReserveView {
        PowerReserveView {
            reserve: self.reserve.current(),
            goal: self.goal.current(),
        }
    }
}
