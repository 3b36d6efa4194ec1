//! State shared between the runner and the game loop thread.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use cogfront_core::commands::PlayerCommand;
use cogfront_core::enums::GamePhase;
use cogfront_core::state::GameStateSnapshot;

/// Commands sent from the runner to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub phase: GamePhase,
    pub boss_health: f32,
    pub player_health: f32,
    pub bosses_defeated: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes() {
        let summary = RunSummary {
            ticks: 10,
            phase: GamePhase::Won,
            boss_health: 0.0,
            player_health: 5.0,
            bosses_defeated: vec![1],
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"Won\""));
    }
}
