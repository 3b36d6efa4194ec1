//! Hit-point model shared by bosses, the player and destructible parts.

use serde::{Deserialize, Serialize};

/// Outcome of a damage call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    Alive,
    /// Health reached zero on this call. Owners run their death hook.
    Depleted,
}

/// Bounded hit points. `current` is always within `[0, max]`.
///
/// Health has no death guard of its own: it reports `Depleted` every time
/// damage leaves it at zero, so owners must stop calling after the first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    max: f32,
    current: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { max, current: max }
    }

    /// Subtract `amount` and clamp. Negative amounts heal.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        self.current = (self.current - amount).clamp(0.0, self.max);
        if self.current <= 0.0 {
            DamageResult::Depleted
        } else {
            DamageResult::Alive
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount.max(0.0)).min(self.max);
    }

    /// Distress factor: normalized health loss in `[0, 1]`.
    pub fn scale_factor(&self) -> f32 {
        if self.max <= 0.0 {
            return 1.0;
        }
        ((self.max - self.current) / self.max).clamp(0.0, 1.0)
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Restore to full.
    pub fn reset(&mut self) {
        self.current = self.max;
    }
}
