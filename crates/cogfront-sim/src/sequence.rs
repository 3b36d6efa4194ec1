//! Cooperative sequencing primitives.
//!
//! Boss attack cycles and lifecycle scripts are explicit state machines
//! polled once per tick. They suspend by holding a [`Wait`] or [`Tween`]
//! and returning [`Step::Pending`]. Side sequences that run alongside a
//! main sequence live in a [`TaskSet`]; cancelling a task drops all of its
//! state, so nothing resumes later.

/// Slack for float timers accumulated from fixed ticks.
const TIME_EPSILON: f32 = 1e-4;

/// Result of polling a sequence for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Pending,
    Done,
}

impl Step {
    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

/// Suspend for a fixed number of seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wait {
    remaining: f32,
}

impl Wait {
    pub fn new(secs: f32) -> Self {
        Self { remaining: secs }
    }

    pub fn tick(&mut self, dt: f32) -> Step {
        self.remaining -= dt;
        if self.remaining <= TIME_EPSILON {
            Step::Done
        } else {
            Step::Pending
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

/// Progress from 0 to 1 over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    elapsed: f32,
    duration: f32,
}

impl Tween {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    pub fn tick(&mut self, dt: f32) -> Step {
        self.elapsed += dt;
        if self.elapsed >= self.duration - TIME_EPSILON {
            Step::Done
        } else {
            Step::Pending
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }
}

/// Handle to a task in a [`TaskSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u32);

/// Side sequences polled alongside a main sequence.
///
/// Tasks run in spawn order. A task is dropped as soon as it reports
/// [`Step::Done`] or is cancelled.
#[derive(Debug, Clone)]
pub struct TaskSet<T> {
    next_id: u32,
    tasks: Vec<(TaskId, T)>,
}

impl<T> Default for TaskSet<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            tasks: Vec::new(),
        }
    }
}

impl<T> TaskSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push((id, task));
        id
    }

    /// Drop a task. Returns false if it already finished.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(task_id, _)| *task_id != id);
        self.tasks.len() != before
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|(task_id, _)| *task_id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every task once, dropping those that finish.
    pub fn poll(&mut self, mut run: impl FnMut(&mut T) -> Step) {
        self.tasks.retain_mut(|(_, task)| run(task) == Step::Pending);
    }
}
