//! Agent state and steering forces.
//!
//! Every force is a correcting acceleration (`desired - velocity`), not a
//! displacement. The caller sums weighted forces and passes the total to
//! [`Agent::integrate`] once per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use cogfront_core::config::SteeringConfig;
use cogfront_core::error::ContractError;
use cogfront_core::types::heading;

/// A steerable point mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Force applied on the last integration.
    pub acceleration: Vec2,
    pub max_speed: f32,
    pub wander_radius: f32,
    pub wander_time: f32,
    pub target_radius: f32,
    pub slowing_radius: f32,
    wander_timer: f32,
    /// Orbit phase in degrees, shared by `orbit` and `orbit_even`.
    orbit_angle: f32,
}

impl Agent {
    pub fn new(position: Vec2, max_speed: f32) -> Self {
        let config = SteeringConfig {
            max_speed,
            ..SteeringConfig::default()
        };
        Self::from_config(position, &config)
    }

    pub fn from_config(position: Vec2, config: &SteeringConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed: config.max_speed,
            wander_radius: config.wander_radius,
            wander_time: config.wander_time,
            target_radius: config.arrive_target_radius,
            slowing_radius: config.arrive_slowing_radius,
            wander_timer: 0.0,
            orbit_angle: 0.0,
        }
    }

    /// Current orbit phase in degrees. Grows without bound; never reset.
    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    pub fn seek(&self, target: Vec2) -> Vec2 {
        let desired = (target - self.position).normalize_or_zero() * self.max_speed;
        desired - self.velocity
    }

    pub fn flee(&self, threat: Vec2) -> Vec2 {
        let desired = (self.position - threat).normalize_or_zero() * self.max_speed;
        desired - self.velocity
    }

    /// Held random impulse. Returns a force only on the tick the timer expires.
    pub fn wander<R: Rng + ?Sized>(&mut self, rng: &mut R, dt: f32) -> Vec2 {
        self.wander_timer -= dt;
        if self.wander_timer > 0.0 {
            return Vec2::ZERO;
        }
        self.wander_timer = self.wander_time;
        let angle: f32 = rng.gen_range(0.0..360.0);
        heading(angle) * self.wander_radius
    }

    /// Seek that slows inside `slowing_radius`. No force inside `target_radius`.
    pub fn arrive(&self, target: Vec2) -> Vec2 {
        let offset = target - self.position;
        let distance = offset.length();
        if distance < self.target_radius {
            return Vec2::ZERO;
        }
        let mut speed = self.max_speed;
        if distance < self.slowing_radius {
            speed *= distance / self.slowing_radius;
        }
        offset / distance * speed - self.velocity
    }

    /// Advance the orbit phase and seek the point on the circle.
    pub fn orbit(&mut self, target: Vec2, radius: f32, speed: f32, dt: f32) -> Vec2 {
        self.orbit_angle += speed * dt;
        let point = orbit_point(target, radius, self.orbit_angle);
        self.seek(point)
    }

    /// Orbit with a fixed `360 / count * index` degree offset.
    pub fn orbit_even(
        &mut self,
        target: Vec2,
        radius: f32,
        speed: f32,
        index: usize,
        count: usize,
        dt: f32,
    ) -> Result<Vec2, ContractError> {
        let offset = slot_offset(index, count)?;
        self.orbit_angle += speed * dt;
        let point = orbit_point(target, radius, self.orbit_angle + offset);
        Ok(self.seek(point))
    }

    /// The point `orbit_even` currently seeks, without advancing the phase.
    pub fn orbit_slot(
        &self,
        target: Vec2,
        radius: f32,
        index: usize,
        count: usize,
    ) -> Result<Vec2, ContractError> {
        let offset = slot_offset(index, count)?;
        Ok(orbit_point(target, radius, self.orbit_angle + offset))
    }

    /// Apply one fixed tick: `v += a*dt`, clamp `|v|`, then `p += v*dt`.
    pub fn integrate(&mut self, force: Vec2, dt: f32) {
        self.acceleration = force;
        self.velocity = (self.velocity + force * dt).clamp_length_max(self.max_speed);
        self.position += self.velocity * dt;
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Point on a circle at `angle` degrees.
pub fn orbit_point(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + heading(angle) * radius
}

fn slot_offset(index: usize, count: usize) -> Result<f32, ContractError> {
    if count == 0 {
        return Err(ContractError::EmptyOrbitGroup);
    }
    if index >= count {
        return Err(ContractError::OrbitIndexOutOfRange { index, count });
    }
    Ok(360.0 / count as f32 * index as f32)
}
