//! Snapshot system: builds a complete GameStateSnapshot from the scene.
//!
//! This system is read-only. It never modifies the scene.

use cogfront_core::enums::GamePhase;
use cogfront_core::events::GameEvent;
use cogfront_core::state::{DroneView, GameStateSnapshot};
use cogfront_steering::Agent;

use crate::bosses::Boss;
use crate::components::{Drone, Projectile};
use crate::scene::Scene;

pub fn build_snapshot(
    scene: &Scene,
    boss: &Boss,
    phase: GamePhase,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: scene.time,
        phase,
        boss: boss.core().view(),
        player: scene.player.view(),
        parts: scene.parts.views(),
        drones: build_drones(scene),
        projectiles: scene.world.query::<&Projectile>().iter().count(),
        power: scene.reserve.as_ref().map(|reserve| reserve.view()),
        events,
    }
}

/// Drone views, ordered by orbit slot.
fn build_drones(scene: &Scene) -> Vec<DroneView> {
    let mut drones: Vec<DroneView> = scene
        .world
        .query::<(&Drone, &Agent)>()
        .iter()
        .map(|(_, (drone, agent))| DroneView {
            position: agent.position,
            state: drone.state,
            index: drone.index,
            count: drone.count,
        })
        .collect();
    drones.sort_by_key(|d| d.index);
    drones
}
