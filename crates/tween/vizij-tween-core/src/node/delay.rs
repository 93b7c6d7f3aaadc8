//! Wait leaf: consumes time without touching any target.
//!
//! Used to stagger siblings inside serial groups (e.g. one bar after another).

use std::fmt;

use crate::error::{check_duration, check_time_step};
use crate::node::{fire, step_clock, Callback, NodeState};

pub struct Delay {
    duration: f32,
    elapsed: f32,
    state: NodeState,
    on_complete: Option<Callback>,
    label: Option<String>,
}

impl Delay {
    pub fn new(duration: f32) -> crate::Result<Self> {
        check_duration(duration)?;
        Ok(Self {
            duration,
            elapsed: 0.0,
            state: NodeState::Pending,
            on_complete: None,
            label: None,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_on_complete(&mut self, callback: Option<Callback>) {
        self.on_complete = callback;
    }

    #[inline]
    pub fn state(&self) -> NodeState {
        self.state
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn reset(&mut self) {
        self.state = NodeState::Pending;
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) -> crate::Result<f32> {
        check_time_step(dt)?;
        if self.state.is_done() {
            return Ok(dt);
        }
        self.state = NodeState::Running;
        let (elapsed, leftover, finished) = step_clock(self.elapsed, dt, self.duration);
        self.elapsed = elapsed;
        if finished {
            self.state = NodeState::Done;
            fire(&mut self.on_complete);
        }
        Ok(leftover)
    }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delay")
            .field("label", &self.label)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
