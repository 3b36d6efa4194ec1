//! Boss behaviors.
//!
//! Each boss owns a [`BossCore`] (position, health, phase, collider and
//! animation state) and runs one main sequence that the lifecycle director
//! starts after the intro and cancels on death. Damage arrives through
//! [`Damageable`] from the collision system and may layer side effects
//! (drone waves, movement nudges) on top of the main sequence.

pub mod drone;
pub mod eye;
pub mod final_boss;
pub mod goat;

use glam::Vec2;
use log::info;
use serde::{Deserialize, Serialize};

use cogfront_core::config::GameConfig;
use cogfront_core::enums::{BossKind, BossPhase};
use cogfront_core::events::GameEvent;
use cogfront_core::health::{DamageResult, Health};
use cogfront_core::state::BossView;

use crate::animator::Animator;
use crate::scene::Scene;

pub use drone::DroneBoss;
pub use eye::EyeBoss;
pub use final_boss::FinalBoss;
pub use goat::GoatBoss;

/// Anything projectiles can hurt.
pub trait Damageable {
    fn take_damage(&mut self, amount: f32, scene: &mut Scene);
}

/// State shared by every boss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCore {
    pub kind: BossKind,
    pub position: Vec2,
    pub radius: f32,
    pub health: Health,
    pub phase: BossPhase,
    /// Projectiles only hit the boss while this is set.
    pub collider: bool,
    pub visible: bool,
    /// Touching the boss hurts the player.
    pub contact_damage: bool,
    pub animator: Animator,
    /// Main sequence running.
    pub running: bool,
    dead: bool,
    death_notice: bool,
}

impl BossCore {
    pub fn new(kind: BossKind, position: Vec2, radius: f32, max_health: f32, animation: &str) -> Self {
        Self {
            kind,
            position,
            radius,
            health: Health::new(max_health),
            phase: BossPhase::Normal,
            collider: true,
            visible: true,
            contact_damage: false,
            animator: Animator::new(animation),
            running: false,
            dead: false,
            death_notice: false,
        }
    }

    /// Apply damage. Returns true on the one call that kills the boss.
    ///
    /// The kill disables the collider and leaves a notice for the lifecycle
    /// director. Damage after death is ignored.
    pub fn damage(&mut self, amount: f32) -> bool {
        if self.dead {
            return false;
        }
        match self.health.take_damage(amount) {
            DamageResult::Alive => false,
            DamageResult::Depleted => {
                self.dead = true;
                self.collider = false;
                self.death_notice = true;
                info!("{:?} boss defeated", self.kind);
                true
            }
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Consume the death notice. True at most once per boss.
    pub fn take_death_notice(&mut self) -> bool {
        std::mem::take(&mut self.death_notice)
    }

    pub fn distress(&self) -> f32 {
        self.health.scale_factor()
    }

    pub fn can_be_hit(&self) -> bool {
        self.collider && self.visible && !self.dead
    }

    /// Move to a later phase. Phases never move backward.
    pub fn advance_phase(&mut self, phase: BossPhase, scene: &mut Scene) {
        if phase <= self.phase {
            return;
        }
        self.phase = phase;
        info!("{:?} boss entered {phase:?}", self.kind);
        scene.emit(GameEvent::PhaseChanged { phase });
    }

    pub fn view(&self) -> BossView {
        BossView {
            kind: self.kind,
            position: self.position,
            health: self.health.current(),
            max_health: self.health.max(),
            distress: self.distress(),
            phase: self.phase,
            alive: !self.dead,
            animation: self.animator.state().to_string(),
        }
    }
}

/// Health thresholds that each fire once, in order.
///
/// A check fires at most one threshold: the first one crossed that has not
/// fired yet. Healing back above a fired threshold never re-arms it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseGate {
    thresholds: Vec<(f32, BossPhase)>,
    fired: Vec<bool>,
}

impl PhaseGate {
    pub fn new(thresholds: Vec<(f32, BossPhase)>) -> Self {
        let fired = vec![false; thresholds.len()];
        Self { thresholds, fired }
    }

    pub fn check(&mut self, health: f32) -> Option<BossPhase> {
        let index = self
            .thresholds
            .iter()
            .zip(&self.fired)
            .position(|((limit, _), fired)| health <= *limit && !*fired)?;
        self.fired[index] = true;
        Some(self.thresholds[index].1)
    }

    pub fn has_fired(&self, phase: BossPhase) -> bool {
        self.thresholds
            .iter()
            .zip(&self.fired)
            .any(|((_, p), fired)| *p == phase && *fired)
    }
}

/// The behavior every boss exposes to the engine and the lifecycle director.
pub trait BossBehavior: Damageable {
    fn core(&self) -> &BossCore;

    fn core_mut(&mut self) -> &mut BossCore;

    /// Start the main sequence.
    fn start(&mut self, _scene: &mut Scene) {
        self.core_mut().running = true;
    }

    /// Cancel the main sequence and any side sequences.
    fn stop(&mut self, _scene: &mut Scene) {
        self.core_mut().running = false;
    }

    /// Advance one tick.
    fn update(&mut self, scene: &mut Scene);

    /// React to an animation trigger fired by a lifecycle script.
    fn on_trigger(&mut self, _trigger: &str) {}
}

/// The boss of the current scene.
pub enum Boss {
    Eye(EyeBoss),
    Drone(DroneBoss),
    Goat(GoatBoss),
    Final(FinalBoss),
}

impl Boss {
    pub fn spawn(kind: BossKind, config: &GameConfig) -> Self {
        match kind {
            BossKind::Eye => Self::Eye(EyeBoss::new(&config.eye)),
            BossKind::Drone => Self::Drone(DroneBoss::new(&config.drone, &config.steering)),
            BossKind::Goat => Self::Goat(GoatBoss::new(&config.goat, &config.steering)),
            BossKind::Final => Self::Final(FinalBoss::new(&config.final_boss)),
        }
    }

    pub fn behavior(&self) -> &dyn BossBehavior {
        match self {
            Self::Eye(boss) => boss,
            Self::Drone(boss) => boss,
            Self::Goat(boss) => boss,
            Self::Final(boss) => boss,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn BossBehavior {
        match self {
            Self::Eye(boss) => boss,
            Self::Drone(boss) => boss,
            Self::Goat(boss) => boss,
            Self::Final(boss) => boss,
        }
    }

    pub fn core(&self) -> &BossCore {
        self.behavior().core()
    }

    pub fn core_mut(&mut self) -> &mut BossCore {
        self.behavior_mut().core_mut()
    }

    pub fn kind(&self) -> BossKind {
        self.core().kind
    }

    pub fn as_drone_mut(&mut self) -> Option<&mut DroneBoss> {
        match self {
            Self::Drone(boss) => Some(boss),
            _ => None,
        }
    }
}

impl Damageable for Boss {
    fn take_damage(&mut self, amount: f32, scene: &mut Scene) {
        self.behavior_mut().take_damage(amount, scene);
    }
}
