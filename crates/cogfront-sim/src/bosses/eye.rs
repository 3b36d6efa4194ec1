//! THE SPY: a drifting eye that fires while open and blinks when hit.

use glam::Vec2;
use rand::Rng;

use cogfront_core::config::EyeConfig;
use cogfront_core::constants::{BOSS_SHOT_SPEED, EYE_INTRO_OPEN_SECS, EYE_RADIUS, EYE_START};
use cogfront_core::enums::{BossKind, ProjectileKind};
use cogfront_core::types::{heading, lerp};

use super::{BossBehavior, BossCore, Damageable};
use crate::scene::Scene;
use crate::sequence::{Step, Wait};

pub const OPENING: &str = "EyeOpening";
pub const LOOKING_INTRO: &str = "EyeLookingIntro";
pub const LOOKING: &str = "EyeLooking";
pub const CLOSED: &str = "EyeClosed";
pub const DEFEATED: &str = "EyeDefeated";

pub struct EyeBoss {
    core: BossCore,
    config: EyeConfig,
    target_x: f32,
    move_timer: f32,
    cooldown: Option<Wait>,
}

impl EyeBoss {
    pub fn new(config: &EyeConfig) -> Self {
        let mut core = BossCore::new(
            BossKind::Eye,
            Vec2::from(EYE_START),
            EYE_RADIUS,
            config.max_health,
            OPENING,
        );
        core.animator.play_then(OPENING, EYE_INTRO_OPEN_SECS, LOOKING_INTRO);
        Self {
            core,
            config: config.clone(),
            target_x: 0.0,
            move_timer: config.move_interval,
            cooldown: None,
        }
    }

    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    fn retarget(&mut self, scene: &mut Scene) {
        self.target_x = scene
            .rng
            .gen_range(self.config.left_bound..self.config.right_bound);
    }

    /// Closed time shrinks as the board fills up and the eye takes damage.
    fn reopen_secs(&self, scene: &Scene) -> f32 {
        let scaler = scene.board.boss_ratio() * 0.5 + self.core.distress();
        self.config.reopen_secs / (1.0 + scaler)
    }

    fn shoot(&mut self, scene: &mut Scene) {
        let spread = self.config.max_angle * self.core.distress();
        let offset = if spread > 0.0 {
            scene.rng.gen_range(-spread..spread)
        } else {
            0.0
        };
        let direction = heading(-90.0 + offset);
        scene.spawn_projectile(ProjectileKind::BossShot, self.core.position, direction, BOSS_SHOT_SPEED);
    }

    fn drift(&mut self, scene: &mut Scene, dt: f32) {
        self.move_timer -= dt;
        if self.move_timer <= 0.0 && !self.core.is_dead() {
            self.retarget(scene);
            self.move_timer = self.config.move_interval;
        }
        let t = (dt * self.config.move_speed).min(1.0);
        self.core.position.x = lerp(self.core.position.x, self.target_x, t);
    }
}

impl Damageable for EyeBoss {
    fn take_damage(&mut self, amount: f32, scene: &mut Scene) {
        if self.core.is_dead() {
            return;
        }
        scene.animation("Close");
        self.core.damage(amount);
        if !self.core.is_dead() {
            let secs = self.reopen_secs(scene);
            self.core.animator.play_then(CLOSED, secs, LOOKING);
        }
        self.retarget(scene);
    }
}

impl BossBehavior for EyeBoss {
    fn core(&self) -> &BossCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BossCore {
        &mut self.core
    }

    fn stop(&mut self, _scene: &mut Scene) {
        self.core.running = false;
        self.cooldown = None;
    }

    fn update(&mut self, scene: &mut Scene) {
        let dt = scene.dt();
        self.core.animator.tick(dt);
        if !self.core.running {
            return;
        }
        self.drift(scene, dt);

        if let Some(wait) = self.cooldown.as_mut() {
            if wait.tick(dt) == Step::Pending {
                return;
            }
            self.cooldown = None;
        }
        if self.core.animator.is(LOOKING) {
            self.shoot(scene);
            let secs = (1.0 - self.core.distress()) + 0.25;
            self.cooldown = Some(Wait::new(secs));
        }
    }

    fn on_trigger(&mut self, trigger: &str) {
        match trigger {
            "StartGame" => self.core.animator.play(LOOKING),
            "BossDefeated" => self.core.animator.play(DEFEATED),
            _ => {}
        }
    }
}
