//! THE SWARM: a stationary tower that commands a swarm of drones.
//!
//! The main sequence alternates Shooting and Protecting, each preceded by
//! a signal telegraph. Damage can summon more drones: a respawn wave when
//! the swarm is empty, and one wave per health threshold crossed.

use hecs::Entity;
use log::info;

use cogfront_core::config::{DroneConfig, SteeringConfig};
use cogfront_core::constants::{
    DRONE_BOSS_ARRIVAL_SECS, DRONE_BOSS_RADIUS, DRONE_PHASE_SECS, DRONE_SIGNAL_SECS,
};
use cogfront_core::enums::{BossKind, BossPhase, DroneState};
use cogfront_core::events::{GameEvent, SoundCue};
use cogfront_core::types::heading;
use cogfront_steering::Agent;

use super::{BossBehavior, BossCore, Damageable, PhaseGate};
use crate::components::Drone;
use crate::scene::Scene;
use crate::sequence::{Step, Wait};

pub const ARRIVING: &str = "DroneBossArrive";
pub const STATIC: &str = "DroneBossStatic";

/// Where the main sequence is.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    SignalShoot(Wait),
    Shooting(Wait),
    SignalProtect(Wait),
    Protecting(Wait),
}

pub struct DroneBoss {
    core: BossCore,
    config: DroneConfig,
    steering: SteeringConfig,
    /// Spawn order decides orbit slots. Dead drones are pruned lazily.
    drones: Vec<Entity>,
    gate: PhaseGate,
    stage: Option<Stage>,
}

impl DroneBoss {
    pub fn new(config: &DroneConfig, steering: &SteeringConfig) -> Self {
        let mut core = BossCore::new(
            BossKind::Drone,
            config.position,
            DRONE_BOSS_RADIUS,
            config.max_health,
            ARRIVING,
        );
        core.animator.play_then(ARRIVING, DRONE_BOSS_ARRIVAL_SECS, STATIC);
        let gate = PhaseGate::new(vec![
            (config.phase_two_threshold, BossPhase::PhaseTwo),
            (config.phase_three_threshold, BossPhase::PhaseThree),
        ]);
        Self {
            core,
            config: config.clone(),
            steering: steering.clone(),
            drones: Vec::new(),
            gate,
            stage: None,
        }
    }

    pub fn config(&self) -> &DroneConfig {
        &self.config
    }

    /// Live drones, in orbit-slot order.
    pub fn drones(&self, scene: &Scene) -> Vec<Entity> {
        self.drones
            .iter()
            .copied()
            .filter(|e| scene.world.contains(*e))
            .collect()
    }

    pub fn drone_count(&self, scene: &Scene) -> usize {
        self.drones(scene).len()
    }

    /// Show the signal and play its sound. The caller decides whether to wait.
    pub fn signal(&self, scene: &mut Scene) -> Wait {
        scene.animation("Signal");
        scene.sound(SoundCue::DroneBossSignal);
        Wait::new(DRONE_SIGNAL_SECS)
    }

    /// Spawn `count` drones evenly around the tower. The whole swarm waits.
    pub fn spawn_wave(&mut self, scene: &mut Scene, count: u32) {
        if count == 0 {
            return;
        }
        for i in 0..count {
            let angle = i as f32 * (360.0 / count as f32);
            let at = self.core.position + heading(angle) * self.config.spawn_radius;
            let mut agent = Agent::from_config(at, &self.steering);
            agent.max_speed = self.config.max_speed;
            let entity = scene.world.spawn((Drone::new(self.config.hits), agent));
            self.drones.push(entity);
        }
        self.set_state(scene, DroneState::Waiting);
        info!("drone wave of {count}");
        scene.emit(GameEvent::DroneWave { count });
    }

    /// Apply one state to every live drone and renumber their slots.
    pub fn set_state(&mut self, scene: &mut Scene, state: DroneState) {
        self.drones.retain(|e| scene.world.contains(*e));
        let count = self.drones.len();
        for (index, entity) in self.drones.iter().enumerate() {
            if let Ok(mut drone) = scene.world.get::<&mut Drone>(*entity) {
                drone.state = state;
                drone.index = index;
                drone.count = count;
            }
        }
    }

    fn advance(&mut self, scene: &mut Scene, stage: Stage) -> Stage {
        let dt = scene.dt();
        match stage {
            Stage::SignalShoot(mut wait) => {
                if wait.tick(dt) == Step::Pending {
                    return Stage::SignalShoot(wait);
                }
                self.set_state(scene, DroneState::Shooting);
                Stage::Shooting(Wait::new(DRONE_PHASE_SECS))
            }
            Stage::Shooting(mut wait) => {
                if wait.tick(dt) == Step::Pending {
                    return Stage::Shooting(wait);
                }
                Stage::SignalProtect(self.signal(scene))
            }
            Stage::SignalProtect(mut wait) => {
                if wait.tick(dt) == Step::Pending {
                    return Stage::SignalProtect(wait);
                }
                self.set_state(scene, DroneState::Protecting);
                Stage::Protecting(Wait::new(DRONE_PHASE_SECS))
            }
            Stage::Protecting(mut wait) => {
                if wait.tick(dt) == Step::Pending {
                    return Stage::Protecting(wait);
                }
                Stage::SignalShoot(self.signal(scene))
            }
        }
    }
}

impl Damageable for DroneBoss {
    fn take_damage(&mut self, amount: f32, scene: &mut Scene) {
        if self.core.is_dead() {
            return;
        }
        self.core.damage(amount);

        if self.drone_count(scene) == 0 {
            scene.sound(SoundCue::DroneBossSignal);
            self.spawn_wave(scene, self.config.respawn_wave);
        }

        if let Some(phase) = self.gate.check(self.core.health.current()) {
            let wave = match phase {
                BossPhase::PhaseTwo => self.config.phase_two_wave,
                _ => self.config.phase_three_wave,
            };
            scene.sound(SoundCue::DroneBossSignal);
            self.spawn_wave(scene, wave);
            self.core.advance_phase(phase, scene);
        }
    }
}

impl BossBehavior for DroneBoss {
    fn core(&self) -> &BossCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BossCore {
        &mut self.core
    }

    fn start(&mut self, scene: &mut Scene) {
        self.core.running = true;
        self.stage = Some(Stage::SignalShoot(self.signal(scene)));
    }

    fn stop(&mut self, _scene: &mut Scene) {
        self.core.running = false;
        self.stage = None;
    }

    fn update(&mut self, scene: &mut Scene) {
        self.core.animator.tick(scene.dt());
        if !self.core.running {
            return;
        }
        if let Some(stage) = self.stage.take() {
            self.stage = Some(self.advance(scene, stage));
        }
    }
}
