//! Steering requests: one weighted contribution to an agent's force.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use cogfront_core::error::ContractError;

use crate::agent::Agent;

/// A single steering contribution, evaluated against an agent each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SteeringRequest {
    Seek(Vec2),
    Flee(Vec2),
    Wander,
    Arrive(Vec2),
    Orbit {
        target: Vec2,
        radius: f32,
        speed: f32,
    },
    OrbitEven {
        target: Vec2,
        radius: f32,
        speed: f32,
        index: usize,
        count: usize,
    },
}

impl SteeringRequest {
    /// Evaluate this request. Stateful requests (wander, orbit) mutate the agent.
    pub fn force<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent,
        rng: &mut R,
        dt: f32,
    ) -> Result<Vec2, ContractError> {
        let force = match *self {
            Self::Seek(target) => agent.seek(target),
            Self::Flee(threat) => agent.flee(threat),
            Self::Wander => agent.wander(rng, dt),
            Self::Arrive(target) => agent.arrive(target),
            Self::Orbit {
                target,
                radius,
                speed,
            } => agent.orbit(target, radius, speed, dt),
            Self::OrbitEven {
                target,
                radius,
                speed,
                index,
                count,
            } => agent.orbit_even(target, radius, speed, index, count, dt)?,
        };
        Ok(force)
    }
}

/// Sum weighted requests in order. Stops at the first contract violation.
pub fn combine<R: Rng + ?Sized>(
    agent: &mut Agent,
    requests: &[(f32, SteeringRequest)],
    rng: &mut R,
    dt: f32,
) -> Result<Vec2, ContractError> {
    let mut total = Vec2::ZERO;
    for (weight, request) in requests {
        total += request.force(agent, rng, dt)? * *weight;
    }
    Ok(total)
}
