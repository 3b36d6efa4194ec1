//! Projectile collision resolution.
//!
//! Projectiles are snapshotted first, then resolved in spawn order:
//! - player shots clear hostile shots they touch, then hit the boss or a drone
//! - turret shots hit the boss or a drone
//! - hostile shots strike placed parts (walls stop them) and the player
//!
//! Returns the projectiles used up this tick. The cleanup system despawns them.

use glam::Vec2;
use hecs::Entity;

use cogfront_core::constants::{DRONE_RADIUS, PLAYER_HIT_DAMAGE};
use cogfront_core::enums::{PartKind, ProjectileKind};
use cogfront_core::events::{GameEvent, SoundCue};
use cogfront_core::types::PartId;
use cogfront_grid::board::PartHit;
use cogfront_steering::Agent;

use crate::bosses::{Boss, Damageable};
use crate::components::{Drone, Position, Projectile};
use crate::scene::Scene;

#[derive(Debug, Clone, Copy)]
struct Shot {
    entity: Entity,
    kind: ProjectileKind,
    at: Vec2,
    radius: f32,
}

pub fn run(scene: &mut Scene, boss: &mut Boss) -> Vec<Entity> {
    let shots: Vec<Shot> = scene
        .world
        .query::<(&Position, &Projectile)>()
        .iter()
        .map(|(entity, (pos, projectile))| Shot {
            entity,
            kind: projectile.kind,
            at: pos.0,
            radius: projectile.radius,
        })
        .collect();
    let mut drones: Vec<(Entity, Vec2)> = scene
        .world
        .query::<(&Drone, &Agent)>()
        .iter()
        .map(|(entity, (_, agent))| (entity, agent.position))
        .collect();

    let mut consumed: Vec<Entity> = Vec::new();
    for shot in &shots {
        if consumed.contains(&shot.entity) {
            continue;
        }
        match shot.kind {
            ProjectileKind::PlayerShot => {
                for other in &shots {
                    if other.kind.is_hostile()
                        && !consumed.contains(&other.entity)
                        && other.at.distance(shot.at) < other.radius + shot.radius
                    {
                        consumed.push(other.entity);
                        scene.sound(SoundCue::Trash);
                    }
                }
                let damage = scene.config.player.shot_damage;
                if strike_boss_or_drone(scene, boss, &mut drones, shot, damage) {
                    consumed.push(shot.entity);
                }
            }
            ProjectileKind::TurretShot => {
                let damage = scene.config.turret.boss_damage;
                if strike_boss_or_drone(scene, boss, &mut drones, shot, damage) {
                    consumed.push(shot.entity);
                }
            }
            ProjectileKind::BossShot | ProjectileKind::DroneShot | ProjectileKind::PartMissile => {
                if strike_parts(scene, shot) || strike_player(scene, shot) {
                    consumed.push(shot.entity);
                }
            }
        }
    }

    contact_damage(scene, boss);
    consumed
}

/// Hit the boss if it overlaps, otherwise the first overlapping drone.
fn strike_boss_or_drone(
    scene: &mut Scene,
    boss: &mut Boss,
    drones: &mut Vec<(Entity, Vec2)>,
    shot: &Shot,
    damage: f32,
) -> bool {
    let core = boss.core();
    if core.can_be_hit() && core.position.distance(shot.at) < core.radius + shot.radius {
        boss.take_damage(damage, scene);
        scene.explosion(shot.at, false);
        scene.sound(SoundCue::TurretHit);
        return true;
    }

    let Some(index) = drones
        .iter()
        .position(|(_, at)| at.distance(shot.at) < DRONE_RADIUS + shot.radius)
    else {
        return false;
    };
    let (entity, at) = drones[index];
    if hit_drone(scene, entity, at) {
        drones.remove(index);
    }
    true
}

/// Take one hit off a drone. Returns true if it was destroyed.
fn hit_drone(scene: &mut Scene, entity: Entity, at: Vec2) -> bool {
    let remaining = match scene.world.get::<&mut Drone>(entity) {
        Ok(mut drone) => {
            drone.hits = drone.hits.saturating_sub(1);
            drone.hits
        }
        Err(_) => return false,
    };
    if remaining > 0 {
        scene.animation("TookDamage");
        return false;
    }
    let _ = scene.world.despawn(entity);
    scene.explosion(at, false);
    scene.sound(SoundCue::TurretHit);
    true
}

/// Damage placed parts under a hostile shot. Returns true if a wall stopped it.
fn strike_parts(scene: &mut Scene, shot: &Shot) -> bool {
    let reach = scene.board.cell_size() * 0.5 + shot.radius;
    let struck: Vec<PartId> = match scene.world.get::<&Projectile>(shot.entity) {
        Ok(projectile) => projectile.struck.clone(),
        Err(_) => return false,
    };
    let targets: Vec<(PartId, PartKind)> = scene
        .board
        .occupied()
        .filter_map(|(_, id)| scene.parts.get(id))
        .filter(|p| p.placed && !struck.contains(&p.id) && p.position.distance(shot.at) < reach)
        .map(|p| (p.id, p.kind))
        .collect();

    for (id, kind) in targets {
        if let Ok(mut projectile) = scene.world.get::<&mut Projectile>(shot.entity) {
            projectile.struck.push(id);
        }
        scene.explosion(shot.at, false);
        let stopped = kind == PartKind::Wall;
        scene.sound(if stopped {
            SoundCue::WallHit
        } else {
            SoundCue::TurretHit
        });
        let destroyed = scene.board.damage_part(&mut scene.parts, id, shot.kind.part_damage());
        if destroyed == PartHit::Destroyed {
            scene.emit(GameEvent::PartDestroyed { part: id });
        }
        if stopped {
            return true;
        }
    }
    false
}

fn strike_player(scene: &mut Scene, shot: &Shot) -> bool {
    let player = &scene.player;
    if !player.is_targetable() || player.position.distance(shot.at) >= player.radius + shot.radius {
        return false;
    }
    scene.player.hurt(PLAYER_HIT_DAMAGE);
    scene.sound(SoundCue::PlayerHurt);
    true
}

/// Bosses with contact damage hurt the player on touch.
fn contact_damage(scene: &mut Scene, boss: &Boss) {
    let core = boss.core();
    if !core.contact_damage || !core.visible || core.is_dead() {
        return;
    }
    let player = &scene.player;
    if player.is_targetable() && player.position.distance(core.position) < core.radius + player.radius {
        scene.player.hurt(PLAYER_HIT_DAMAGE);
        scene.sound(SoundCue::PlayerHurt);
    }
}
