//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the scene, the active boss and the lifecycle
//! director, processes player commands, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use log::{debug, info};

use cogfront_core::commands::PlayerCommand;
use cogfront_core::config::SimConfig;
use cogfront_core::enums::GamePhase;
use cogfront_core::events::{GameEvent, SoundCue};
use cogfront_core::state::GameStateSnapshot;
use cogfront_core::types::SimTime;
use cogfront_grid::power;

use crate::bosses::Boss;
use crate::lifecycle::Lifecycle;
use crate::player;
use crate::scene::Scene;
use crate::systems;
use crate::world_setup;

/// The simulation engine. Owns the scene and all sim state.
pub struct SimulationEngine {
    scene: Scene,
    boss: Boss,
    lifecycle: Lifecycle,
    phase: GamePhase,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The intro starts on the first tick.
    pub fn new(config: SimConfig) -> Self {
        let scene = world_setup::build_scene(&config);
        let boss = Boss::spawn(config.boss, &config.game);
        let lifecycle = Lifecycle::new(config.boss, &config.game);
        info!("new {:?} scene, seed {}", config.boss, config.seed);
        Self {
            scene,
            boss,
            lifecycle,
            phase: GamePhase::Intro,
            command_queue: VecDeque::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.is_running() {
            self.run_systems();
            self.scene.time.advance();
        }

        let events = std::mem::take(&mut self.scene.events);
        systems::snapshot::build_snapshot(&self.scene, &self.boss, self.phase, events)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.scene.time
    }

    /// Get a read-only reference to the scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get a read-only reference to the boss.
    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    #[cfg(test)]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Split borrow of the boss and the scene it acts on.
    #[cfg(test)]
    pub fn boss_and_scene(&mut self) -> (&mut Boss, &mut Scene) {
        (&mut self.boss, &mut self.scene)
    }

    fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Intro | GamePhase::Active) && self.scene.time_scale > 0.0
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        let accepts_input = self.phase == GamePhase::Active && self.scene.player.active;
        match command {
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            _ if !accepts_input => debug!("ignored {command:?} in {:?}", self.phase),
            PlayerCommand::Move { direction } => self.scene.player.input = direction,
            PlayerCommand::Interact { at } => player::interact(&mut self.scene, at),
            PlayerCommand::Shoot { toward } => player::shoot(&mut self.scene, toward),
            PlayerCommand::RotatePart { at, degrees } => {
                player::rotate_part(&mut self.scene, at, degrees)
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let scene = &mut self.scene;
        // 1. Lifecycle scripts, boss and player death
        self.lifecycle.tick(scene, &mut self.boss, &mut self.phase);
        if scene.time_scale <= 0.0 {
            return;
        }
        // 2. Boss main sequence and side tasks
        self.boss.behavior_mut().update(scene);
        // 3. Conveyor belts
        let dt = scene.dt();
        for belt in &mut scene.belts {
            let tick = belt.tick(&mut scene.parts, &mut scene.rng, dt);
            for part in tick.evicted {
                debug!("belt {} dropped {part:?}", belt.index);
            }
        }
        // 4. Power reserve and propagation
        let online = match scene.reserve.as_mut() {
            Some(reserve) => {
                reserve.tick(&scene.board, &scene.parts, dt);
                reserve.is_online()
            }
            None => true,
        };
        power::propagate(&scene.board, &mut scene.parts, online);
        // 5. Auto gears and turrets
        let boss_position = self.boss.core().position;
        systems::turrets::run(scene, boss_position);
        // 6. Drone swarm
        systems::drones::run(scene, boss_position);
        // 7. Player movement and held part
        player::update(scene);
        // 8. Projectile movement
        systems::movement::run(&mut scene.world, dt);
        // 9. Collisions
        let consumed = systems::collisions::run(scene, &mut self.boss);
        // 10. Cleanup
        systems::cleanup::run(&mut scene.world, &scene.bounds, &consumed, &mut scene.despawn_buffer);
        // 11. Easter egg pattern
        let mut found = None;
        if let Some(pattern) = scene.pattern.as_mut() {
            if pattern.check(&scene.board, &scene.parts) {
                found = Some(pattern.scene.clone());
            }
        }
        if let Some(name) = found {
            info!("tile pattern complete: {name}");
            scene.sound(SoundCue::EasterEgg);
            scene.emit(GameEvent::EasterEggFound { scene: name });
        }
    }
}
