//! THE DEMON: hovers between points, spins the board and fires cones.

use glam::Vec2;
use log::{debug, warn};

use cogfront_core::config::{GoatConfig, SteeringConfig};
use cogfront_core::constants::{
    BOSS_SHOT_SPEED, GOAT_BASE_DELAY, GOAT_BOARD_TURN_SECS, GOAT_HOVER_RADIUS, GOAT_HOVER_SPEED,
    GOAT_HOVER_WEIGHT, GOAT_MAX_SPEED, GOAT_RADIUS, GOAT_SCALED_DELAY,
};
use cogfront_core::enums::{BossKind, ProjectileKind};
use cogfront_core::events::SoundCue;
use cogfront_core::types::{angle_of, heading, lerp};
use cogfront_steering::{Agent, SteeringRequest};

use super::{BossBehavior, BossCore, Damageable};
use crate::scene::Scene;
use crate::sequence::{Step, Tween, Wait};

pub const IDLE: &str = "GoatIdle";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    /// Board turning from `from` to `to` degrees.
    Turning { tween: Tween, from: f32, to: f32 },
    Waiting(Wait),
}

pub struct GoatBoss {
    core: BossCore,
    config: GoatConfig,
    agent: Agent,
    hovering: bool,
    hover_target: Vec2,
    next_point: usize,
    stage: Option<Stage>,
}

impl GoatBoss {
    pub fn new(config: &GoatConfig, steering: &SteeringConfig) -> Self {
        let mut core = BossCore::new(BossKind::Goat, config.start, GOAT_RADIUS, config.max_health, IDLE);
        core.contact_damage = true;
        let mut agent = Agent::from_config(config.start, steering);
        agent.max_speed = GOAT_MAX_SPEED;
        Self {
            core,
            config: config.clone(),
            agent,
            hovering: false,
            hover_target: config.hover_points.first().copied().unwrap_or(config.start),
            next_point: 1,
            stage: None,
        }
    }

    pub fn hover_target(&self) -> Vec2 {
        self.hover_target
    }

    fn begin_turn(&self, scene: &Scene) -> Stage {
        let from = scene.board.rotation();
        Stage::Turning {
            tween: Tween::new(GOAT_BOARD_TURN_SECS),
            from,
            to: from + self.config.board_turn,
        }
    }

    /// Fire `cone_count` shots spread over `cone_angle`, centered on the target.
    fn fire_cone(&self, scene: &mut Scene) {
        let origin = self.core.position;
        let base = angle_of(self.config.target - origin);
        let count = self.config.cone_count;
        if count == 1 {
            scene.spawn_projectile(ProjectileKind::BossShot, origin, heading(base), BOSS_SHOT_SPEED);
            return;
        }
        let step = self.config.cone_angle / (count - 1) as f32;
        for i in 0..count {
            let angle = base - self.config.cone_angle / 2.0 + step * i as f32;
            scene.spawn_projectile(ProjectileKind::BossShot, origin, heading(angle), BOSS_SHOT_SPEED);
        }
    }

    fn next_hover_point(&mut self) {
        let points = &self.config.hover_points;
        if points.is_empty() {
            return;
        }
        let index = self.next_point % points.len();
        self.hover_target = points[index];
        self.next_point = (index + 1) % points.len();
        debug!("goat hovering toward {:?}", self.hover_target);
    }

    fn advance(&mut self, scene: &mut Scene, stage: Stage) -> Stage {
        let dt = scene.dt();
        match stage {
            Stage::Turning {
                mut tween,
                from,
                to,
            } => {
                let step = tween.tick(dt);
                let angle = lerp(from, to, tween.progress());
                scene.board.set_rotation(&mut scene.parts, angle);
                if step == Step::Pending {
                    return Stage::Turning { tween, from, to };
                }
                let delay = GOAT_BASE_DELAY + (1.0 - self.core.distress()) * GOAT_SCALED_DELAY;
                Stage::Waiting(Wait::new(delay))
            }
            Stage::Waiting(mut wait) => {
                if wait.tick(dt) == Step::Pending {
                    return Stage::Waiting(wait);
                }
                self.fire_cone(scene);
                self.next_hover_point();
                self.begin_turn(scene)
            }
        }
    }

    fn steer(&mut self, scene: &mut Scene, dt: f32) {
        if !self.hovering {
            return;
        }
        let request = SteeringRequest::Orbit {
            target: self.hover_target,
            radius: GOAT_HOVER_RADIUS,
            speed: GOAT_HOVER_SPEED,
        };
        let force = match request.force(&mut self.agent, &mut scene.rng, dt) {
            Ok(force) => force * GOAT_HOVER_WEIGHT,
            Err(err) => {
                warn!("goat steering: {err}");
                return;
            }
        };
        self.agent.integrate(force, dt);
        self.core.position = self.agent.position;
    }
}

impl Damageable for GoatBoss {
    fn take_damage(&mut self, amount: f32, scene: &mut Scene) {
        if self.core.is_dead() {
            return;
        }
        scene.sound(SoundCue::GoatBossDead);
        if self.core.damage(amount) {
            // Dive at the player on the way out.
            self.hover_target = self.config.target;
        }
    }
}

impl BossBehavior for GoatBoss {
    fn core(&self) -> &BossCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BossCore {
        &mut self.core
    }

    fn start(&mut self, scene: &mut Scene) {
        self.core.running = true;
        self.hovering = true;
        self.stage = Some(self.begin_turn(scene));
    }

    fn stop(&mut self, _scene: &mut Scene) {
        self.core.running = false;
        self.stage = None;
    }

    fn update(&mut self, scene: &mut Scene) {
        let dt = scene.dt();
        self.core.animator.tick(dt);
        self.steer(scene, dt);
        if !self.core.running {
            return;
        }
        if let Some(stage) = self.stage.take() {
            self.stage = Some(self.advance(scene, stage));
        }
    }
}
