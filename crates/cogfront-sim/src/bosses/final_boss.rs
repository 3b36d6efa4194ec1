//! THE DIRECTOR: grabs placed parts with its claw and flings them back,
//! lasers board cells away once hurt, and sweeps a saw arm each cycle.
//!
//! The main sequence is a single [`Stage`] machine. Horizontal moves and
//! projectile bursts are side tasks in a [`TaskSet`]; a hit cancels the
//! current move and starts a new nudge.

use glam::Vec2;
use log::debug;
use rand::Rng;

use cogfront_core::config::FinalBossConfig;
use cogfront_core::constants::{
    BLADE_PART_DAMAGE, BOSS_SHOT_SPEED, FINAL_BURST_GAP, FINAL_CHARGE_SECS,
    FINAL_CLAW_REST, FINAL_DEFAULT_BURST, FINAL_LASER_SPACING, FINAL_MUZZLE,
    FINAL_PHASE_TWO_BURST, FINAL_RADIUS, FINAL_SAW_RADIUS, FINAL_SAW_REACH, PART_MISSILE_SPEED,
    PLAYER_HIT_DAMAGE,
};
use cogfront_core::enums::{BossKind, BossPhase, PartKind, ProjectileKind};
use cogfront_core::events::{GameEvent, SoundCue};
use cogfront_core::state::PartLocation;
use cogfront_core::types::{heading, lerp, smoothstep, CellKey, PartId};
use cogfront_grid::board::PartHit;

use super::{BossBehavior, BossCore, Damageable};
use crate::scene::Scene;
use crate::sequence::{Step, TaskId, TaskSet, Tween, Wait};

pub const IDLE: &str = "FinalIdle";

/// Saw arm swing, in degrees, over the swing duration.
const SAW_SWEEP: f32 = -360.0;
const SAW_ARM_SECS: f32 = 0.5;
const SAW_SWING_SECS: f32 = 3.0;
const SPARK_SECS: f32 = 1.0;
const RECOIL_SECS: f32 = 1.0;
const ARM_RESET_SECS: f32 = 1.0;
/// Heading of a flung part.
const FLING_HEADING: f32 = -135.0;

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    /// Claw travelling toward a part.
    Reach {
        part: PartId,
        expected: Vec2,
        from: Vec2,
        tween: Tween,
    },
    /// Claw returning empty-handed.
    Rest { from: Vec2, tween: Tween },
    /// Claw returning with a captured part.
    Retract {
        part: PartId,
        from: Vec2,
        tween: Tween,
    },
    Charge { part: PartId, tween: Tween },
    Recoil(Wait),
    ArmReset(Tween),
    Sparks(Wait),
    Laser {
        cell: CellKey,
        target: Vec2,
        segments: u32,
        emitted: u32,
        elapsed: f32,
    },
    SawLower(Tween),
    Saw { tween: Tween, struck: Vec<PartId> },
    SawRaise(Tween),
}

/// Side sequences that run alongside the main stage.
#[derive(Debug, Clone, PartialEq)]
enum Task {
    Move { from: f32, to: f32, progress: f32 },
    Burst { angle: f32, remaining: u32, gap: Wait },
}

pub struct FinalBoss {
    core: BossCore,
    config: FinalBossConfig,
    /// World position of the claw.
    claw: Vec2,
    stage: Option<Stage>,
    tasks: TaskSet<Task>,
    move_task: Option<TaskId>,
}

impl FinalBoss {
    pub fn new(config: &FinalBossConfig) -> Self {
        let core = BossCore::new(BossKind::Final, config.start, FINAL_RADIUS, config.max_health, IDLE);
        Self {
            claw: config.start + Vec2::from(FINAL_CLAW_REST),
            core,
            config: config.clone(),
            stage: None,
            tasks: TaskSet::new(),
            move_task: None,
        }
    }

    pub fn claw(&self) -> Vec2 {
        self.claw
    }

    /// True while a horizontal move is in progress.
    pub fn is_moving(&self) -> bool {
        self.move_task.is_some_and(|id| self.tasks.contains(id))
    }

    pub fn captured_part(&self) -> Option<PartId> {
        match &self.stage {
            Some(Stage::Retract { part, .. } | Stage::Charge { part, .. }) => Some(*part),
            _ => None,
        }
    }

    fn rest_point(&self) -> Vec2 {
        self.core.position + Vec2::from(FINAL_CLAW_REST)
    }

    fn muzzle(&self) -> Vec2 {
        self.core.position + Vec2::from(FINAL_MUZZLE)
    }

    /// Replace any running horizontal move with one toward `x + offset`.
    fn start_move(&mut self, offset: f32) {
        if let Some(id) = self.move_task.take() {
            self.tasks.cancel(id);
        }
        let from = self.core.position.x;
        let to = (from + offset).clamp(self.config.min_x, self.config.max_x);
        self.move_task = Some(self.tasks.spawn(Task::Move {
            from,
            to,
            progress: 0.0,
        }));
    }

    fn start_burst(&mut self, scene: &mut Scene, shots: u32) {
        let angle = scene.rng.gen_range(60.0..120.0);
        self.tasks.spawn(Task::Burst {
            angle: -angle,
            remaining: shots,
            gap: Wait::new(0.0),
        });
    }

    /// Pick a placed part within claw reach, or head back to rest.
    fn begin_cycle(&mut self, scene: &mut Scene) -> Stage {
        let here = self.core.position;
        let reach = self.config.claw_reach;
        let candidates: Vec<(PartId, Vec2)> = scene
            .board
            .occupied()
            .filter_map(|(_, id)| scene.parts.get(id))
            .filter(|part| part.placed && part.position.distance(here) <= reach)
            .map(|part| (part.id, part.position))
            .collect();
        let tween = Tween::new(self.config.claw_travel_secs);
        if candidates.is_empty() {
            return Stage::Rest {
                from: self.claw,
                tween,
            };
        }
        let (part, expected) = candidates[scene.rng.gen_range(0..candidates.len())];
        Stage::Reach {
            part,
            expected,
            from: self.claw,
            tween,
        }
    }

    /// Still on the board where the claw was sent, and within reach.
    fn can_capture(&self, scene: &Scene, part: PartId, expected: Vec2) -> bool {
        scene.parts.get(part).is_some_and(|p| {
            p.placed
                && p.position.distance(expected) < 1e-3
                && p.position.distance(self.core.position) <= self.config.claw_reach
        })
    }

    fn capture(&mut self, scene: &mut Scene, part: PartId) -> bool {
        let Some(key) = scene.board.cell_of(part) else {
            return false;
        };
        if scene.board.take_from_cell(&mut scene.parts, key).is_none() {
            return false;
        }
        if let Some(p) = scene.parts.get_mut(part) {
            p.location = PartLocation::Captured;
        }
        scene.animation("CloseClaw");
        debug!("claw captured {part:?} from {key:?}");
        true
    }

    fn fling(&mut self, scene: &mut Scene, part: PartId) {
        scene.animation("OpenClaw");
        if let Some(p) = scene.parts.remove(part) {
            scene.spawn_part_missile(p.position, heading(FLING_HEADING), PART_MISSILE_SPEED, p.kind);
            scene.emit(GameEvent::PartDestroyed { part });
        }
        scene.sound(SoundCue::TurretShoot);
    }

    fn after_capture(&mut self, scene: &mut Scene) -> Stage {
        if self.core.health.current() <= self.config.phase_two_threshold {
            self.core.advance_phase(BossPhase::PhaseTwo, scene);
            self.start_move(self.config.max_x - self.core.position.x);
            self.start_burst(scene, FINAL_PHASE_TWO_BURST);
            scene.animation("SparksOn");
            return Stage::Sparks(Wait::new(SPARK_SECS));
        }
        self.start_burst(scene, FINAL_DEFAULT_BURST);
        self.reposition(scene)
    }

    fn fire_laser(&mut self, scene: &mut Scene) -> Stage {
        let Some(cell) = scene.board.take_destroy_option(&mut scene.rng) else {
            scene.animation("SparksOff");
            return self.reposition(scene);
        };
        scene.sound(SoundCue::FinalBossLaser);
        let target = scene.board.cell_world(cell);
        let distance = self.muzzle().distance(target);
        let segments = ((distance / FINAL_LASER_SPACING).ceil() as u32).max(1);
        Stage::Laser {
            cell,
            target,
            segments,
            emitted: 0,
            elapsed: 0.0,
        }
    }

    fn finish_laser(&mut self, scene: &mut Scene, cell: CellKey, target: Vec2) {
        scene.animation("SparksOff");
        scene.explosion(target, false);
        scene.sound(SoundCue::TurretHit);
        let destroyed = scene.board.destroy_cell(&mut scene.parts, cell);
        scene.emit(GameEvent::CellDestroyed { cell });
        if let Some(part) = destroyed {
            scene.emit(GameEvent::PartDestroyed { part });
        }
        debug!("laser removed cell {cell:?}");
    }

    /// Head for the rightmost placed part, or retreat left, then lower the saw.
    fn reposition(&mut self, scene: &mut Scene) -> Stage {
        let goal = scene
            .board
            .rightmost_part(&scene.parts)
            .and_then(|id| scene.parts.get(id))
            .map(|p| p.position.x)
            .unwrap_or(self.config.min_x);
        self.start_move(goal - self.core.position.x);
        Stage::SawLower(Tween::new(SAW_ARM_SECS))
    }

    /// Saw blade position for a swing at `progress`.
    fn blade(&self, progress: f32) -> Vec2 {
        let angle = SAW_SWEEP * progress * progress;
        self.core.position + heading(-90.0 + angle) * FINAL_SAW_REACH
    }

    fn swing_saw(&self, scene: &mut Scene, blade: Vec2, struck: &mut Vec<PartId>) {
        let reach = FINAL_SAW_RADIUS + scene.board.cell_size() * 0.5;
        let hits: Vec<(PartId, PartKind)> = scene
            .board
            .occupied()
            .filter_map(|(_, id)| scene.parts.get(id))
            .filter(|p| p.placed && !struck.contains(&p.id) && p.position.distance(blade) <= reach)
            .map(|p| (p.id, p.kind))
            .collect();
        for (id, kind) in hits {
            struck.push(id);
            scene.sound(if kind == PartKind::Wall {
                SoundCue::WallHit
            } else {
                SoundCue::TurretHit
            });
            scene.explosion(blade, false);
            if scene.board.damage_part(&mut scene.parts, id, BLADE_PART_DAMAGE) == PartHit::Destroyed {
                scene.emit(GameEvent::PartDestroyed { part: id });
            }
        }

        let player = &scene.player;
        if player.is_targetable() && player.position.distance(blade) <= FINAL_SAW_RADIUS + player.radius {
            scene.player.hurt(PLAYER_HIT_DAMAGE);
            scene.sound(SoundCue::PlayerHurt);
        }
    }

    fn advance(&mut self, scene: &mut Scene, stage: Stage) -> Stage {
        let dt = scene.dt();
        match stage {
            Stage::Reach {
                part,
                expected,
                from,
                mut tween,
            } => {
                let step = tween.tick(dt);
                self.claw = from.lerp(expected, smoothstep(tween.progress()));
                if step == Step::Pending {
                    return Stage::Reach {
                        part,
                        expected,
                        from,
                        tween,
                    };
                }
                let travel = Tween::new(self.config.claw_travel_secs);
                if self.can_capture(scene, part, expected) && self.capture(scene, part) {
                    Stage::Retract {
                        part,
                        from: self.claw,
                        tween: travel,
                    }
                } else {
                    Stage::Rest {
                        from: self.claw,
                        tween: travel,
                    }
                }
            }
            Stage::Rest { from, mut tween } => {
                let step = tween.tick(dt);
                self.claw = from.lerp(self.rest_point(), smoothstep(tween.progress()));
                if step == Step::Pending {
                    return Stage::Rest { from, tween };
                }
                self.after_capture(scene)
            }
            Stage::Retract {
                part,
                from,
                mut tween,
            } => {
                let step = tween.tick(dt);
                self.claw = from.lerp(self.rest_point(), smoothstep(tween.progress()));
                if let Some(p) = scene.parts.get_mut(part) {
                    p.position = self.claw;
                }
                if step == Step::Pending {
                    return Stage::Retract { part, from, tween };
                }
                scene.sound(SoundCue::FinalBossCharge);
                Stage::Charge {
                    part,
                    tween: Tween::new(FINAL_CHARGE_SECS),
                }
            }
            Stage::Charge { part, mut tween } => {
                self.claw = self.rest_point();
                if let Some(p) = scene.parts.get_mut(part) {
                    p.position = self.claw;
                }
                if tween.tick(dt) == Step::Pending {
                    return Stage::Charge { part, tween };
                }
                self.fling(scene, part);
                Stage::Recoil(Wait::new(RECOIL_SECS))
            }
            Stage::Recoil(mut wait) => {
                if wait.tick(dt) == Step::Pending {
                    return Stage::Recoil(wait);
                }
                Stage::ArmReset(Tween::new(ARM_RESET_SECS))
            }
            Stage::ArmReset(mut tween) => {
                if tween.tick(dt) == Step::Pending {
                    return Stage::ArmReset(tween);
                }
                self.after_capture(scene)
            }
            Stage::Sparks(mut wait) => {
                if wait.tick(dt) == Step::Pending {
                    return Stage::Sparks(wait);
                }
                self.fire_laser(scene)
            }
            Stage::Laser {
                cell,
                target,
                segments,
                mut emitted,
                mut elapsed,
            } => {
                elapsed += dt;
                let build_secs = self.config.laser_secs * 0.5;
                let per_segment = build_secs / segments as f32;
                let muzzle = self.muzzle();
                let direction = (target - muzzle).normalize_or_zero();
                while emitted < segments && elapsed >= emitted as f32 * per_segment {
                    let at = muzzle + direction * (emitted as f32 * FINAL_LASER_SPACING);
                    scene.emit(GameEvent::LaserSegment { at });
                    emitted += 1;
                }
                if elapsed < self.config.laser_secs {
                    return Stage::Laser {
                        cell,
                        target,
                        segments,
                        emitted,
                        elapsed,
                    };
                }
                self.finish_laser(scene, cell, target);
                self.reposition(scene)
            }
            Stage::SawLower(mut tween) => {
                if tween.tick(dt) == Step::Pending {
                    return Stage::SawLower(tween);
                }
                scene.sound(SoundCue::FinalBossSaw);
                Stage::Saw {
                    tween: Tween::new(SAW_SWING_SECS),
                    struck: Vec::new(),
                }
            }
            Stage::Saw {
                mut tween,
                mut struck,
            } => {
                let step = tween.tick(dt);
                let blade = self.blade(tween.progress());
                self.swing_saw(scene, blade, &mut struck);
                if step == Step::Pending {
                    return Stage::Saw { tween, struck };
                }
                Stage::SawRaise(Tween::new(SAW_ARM_SECS))
            }
            Stage::SawRaise(mut tween) => {
                if tween.tick(dt) == Step::Pending {
                    return Stage::SawRaise(tween);
                }
                self.begin_cycle(scene)
            }
        }
    }

    fn poll_tasks(&mut self, scene: &mut Scene) {
        let dt = scene.dt();
        let speed = self.config.horizontal_speed;
        let Self { core, tasks, .. } = self;
        let muzzle = core.position + Vec2::from(FINAL_MUZZLE);
        tasks.poll(|task| match task {
            Task::Move { from, to, progress } => {
                *progress = (*progress + dt * speed).min(1.0);
                core.position.x = lerp(*from, *to, *progress);
                if *progress >= 1.0 {
                    Step::Done
                } else {
                    Step::Pending
                }
            }
            Task::Burst {
                angle,
                remaining,
                gap,
            } => {
                if gap.tick(dt) == Step::Pending {
                    return Step::Pending;
                }
                scene.spawn_projectile(ProjectileKind::BossShot, muzzle, heading(*angle), BOSS_SHOT_SPEED);
                scene.sound(SoundCue::SmallProjectile);
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    Step::Done
                } else {
                    *gap = Wait::new(FINAL_BURST_GAP);
                    Step::Pending
                }
            }
        });
        if self.move_task.is_some_and(|id| !self.tasks.contains(id)) {
            self.move_task = None;
        }
    }
}

impl Damageable for FinalBoss {
    fn take_damage(&mut self, amount: f32, _scene: &mut Scene) {
        if self.core.is_dead() {
            return;
        }
        self.core.damage(amount);
        self.start_move(self.config.hit_nudge);
    }
}

impl BossBehavior for FinalBoss {
    fn core(&self) -> &BossCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut BossCore {
        &mut self.core
    }

    fn start(&mut self, scene: &mut Scene) {
        self.core.running = true;
        self.stage = Some(self.begin_cycle(scene));
    }

    /// Cancel everything. A part held in the claw is lost with it.
    fn stop(&mut self, scene: &mut Scene) {
        self.core.running = false;
        if let Some(part) = self.captured_part() {
            scene.parts.remove(part);
            scene.emit(GameEvent::PartDestroyed { part });
        }
        self.stage = None;
        self.tasks.clear();
        self.move_task = None;
    }

    fn update(&mut self, scene: &mut Scene) {
        self.core.animator.tick(scene.dt());
        if self.core.running {
            if let Some(stage) = self.stage.take() {
                self.stage = Some(self.advance(scene, stage));
            }
        }
        if !matches!(
            self.stage,
            Some(Stage::Reach { .. } | Stage::Rest { .. } | Stage::Retract { .. })
        ) {
            self.claw = self.rest_point();
        }
        self.poll_tasks(scene);
    }
}
