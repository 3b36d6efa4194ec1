//! Named animation state per boss.
//!
//! Stands in for the renderer's state machine: behavior code asks "is the
//! current state X" and lifecycle scripts wait on a state by name.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    state: String,
    time_in_state: f32,
    /// State entered automatically once the current one has run this long.
    queued: Option<(f32, String)>,
}

impl Animator {
    pub fn new(state: &str) -> Self {
        Self {
            state: state.to_string(),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn is(&self, state: &str) -> bool {
        self.state == state
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    /// Enter `state` now, dropping any queued transition.
    pub fn play(&mut self, state: &str) {
        self.state = state.to_string();
        self.time_in_state = 0.0;
        self.queued = None;
    }

    /// Enter `state` now and move on to `next` after `secs`.
    pub fn play_then(&mut self, state: &str, secs: f32, next: &str) {
        self.play(state);
        self.queued = Some((secs, next.to_string()));
    }

    pub fn tick(&mut self, dt: f32) {
        self.time_in_state += dt;
        let due = matches!(&self.queued, Some((secs, _)) if self.time_in_state >= *secs);
        if due {
            if let Some((_, next)) = self.queued.take() {
                self.state = next;
                self.time_in_state = 0.0;
            }
        }
    }
}
