//! Turret system: auto gears aim at the boss, powered turrets charge and fire.

use cogfront_core::enums::ProjectileKind;
use cogfront_core::events::SoundCue;
use cogfront_grid::turret;

use crate::scene::Scene;

pub fn run(scene: &mut Scene, boss_position: glam::Vec2) {
    turret::aim_auto_gears(&scene.board, &mut scene.parts, &[boss_position]);

    let dt = scene.dt();
    let interval = scene.config.turret.shoot_interval;
    let speed = scene.config.turret.shot_speed;
    let shots = turret::charge_turrets(&scene.board, &mut scene.parts, dt, interval);
    for shot in shots {
        scene.spawn_projectile(ProjectileKind::TurretShot, shot.origin, shot.direction, speed);
        scene.sound(SoundCue::TurretShoot);
    }
}
