//! Drone swarm steering and shooting.
//!
//! Each drone combines weighted steering requests picked by its state, then
//! integrates. Shooting drones fire outward from the tower on a cooldown.

use glam::Vec2;
use log::warn;

use cogfront_core::constants::{
    BOSS_SHOT_SPEED, DRONE_PROTECT_RADIUS, DRONE_PROTECT_SPEED, DRONE_SHOOT_RADIUS,
    DRONE_SHOOT_SPEED,
};
use cogfront_core::enums::{DroneState, ProjectileKind};
use cogfront_steering::{combine, Agent, SteeringRequest};

use crate::components::Drone;
use crate::scene::Scene;

/// Steer every drone around `tower`.
pub fn run(scene: &mut Scene, tower: Vec2) {
    let dt = scene.dt();
    let config = scene.config.drone.clone();
    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();

    for (entity, (drone, agent)) in scene.world.query_mut::<(&mut Drone, &mut Agent)>() {
        let requests = match drone.state {
            DroneState::Protecting => {
                drone.since_shot = 0.0;
                vec![
                    (
                        config.protect_weight,
                        SteeringRequest::Orbit {
                            target: tower,
                            radius: DRONE_PROTECT_RADIUS,
                            speed: DRONE_PROTECT_SPEED,
                        },
                    ),
                    (config.wander_weight, SteeringRequest::Wander),
                ]
            }
            DroneState::Shooting | DroneState::Waiting => {
                drone.since_shot += dt;
                vec![(
                    config.shoot_weight,
                    SteeringRequest::OrbitEven {
                        target: tower,
                        radius: DRONE_SHOOT_RADIUS,
                        speed: DRONE_SHOOT_SPEED,
                        index: drone.index,
                        count: drone.count,
                    },
                )]
            }
            DroneState::Scattering => {
                drone.since_shot += dt;
                vec![(config.scatter_weight, SteeringRequest::Flee(tower))]
            }
        };

        match combine(agent, &requests, &mut scene.rng, dt) {
            Ok(force) => agent.integrate(force, dt),
            Err(err) => warn!("drone {entity:?} steering: {err}"),
        }

        if drone.state == DroneState::Shooting && drone.since_shot >= config.shoot_cooldown {
            drone.since_shot = 0.0;
            shots.push((agent.position, agent.position - tower));
        }
    }

    for (origin, direction) in shots {
        scene.spawn_projectile(ProjectileKind::DroneShot, origin, direction, BOSS_SHOT_SPEED);
    }
}
