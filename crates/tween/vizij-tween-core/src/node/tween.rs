//! Leaf tween: interpolates one channel of one target.

use std::fmt;

use crate::channel::ChannelKind;
use crate::easing::Ease;
use crate::error::{check_duration, check_time_step, TweenError};
use crate::interp::lerp_components;
use crate::node::{fire, step_clock, Callback, NodeState};
use crate::tweenable::TweenableRef;

pub struct Tween {
    target: TweenableRef,
    channel: ChannelKind,
    duration: f32,
    easing: Box<dyn Ease>,
    end: Vec<f32>,
    /// Captured on the first advance out of `Pending`.
    start: Vec<f32>,
    elapsed: f32,
    state: NodeState,
    on_complete: Option<Callback>,
    label: Option<String>,
    scratch: Vec<f32>,
}

impl Tween {
    pub fn new(
        target: TweenableRef,
        channel: ChannelKind,
        duration: f32,
        easing: impl Ease + 'static,
        end_values: impl Into<Vec<f32>>,
    ) -> crate::Result<Self> {
        check_duration(duration)?;
        Ok(Self {
            target,
            channel,
            duration,
            easing: Box::new(easing),
            end: end_values.into(),
            start: Vec::new(),
            elapsed: 0.0,
            state: NodeState::Pending,
            on_complete: None,
            label: None,
            scratch: Vec::new(),
        })
    }

    pub fn with_on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
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
    pub fn channel(&self) -> ChannelKind {
        self.channel
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

    /// Progress after easing; may leave [0, 1] for overshooting curves.
    #[inline]
    pub fn eased_progress(&self) -> f32 {
        self.easing.progress(self.progress())
    }

    pub fn end_values(&self) -> &[f32] {
        &self.end
    }

    /// Empty until the first advance.
    pub fn start_values(&self) -> &[f32] {
        &self.start
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn target(&self) -> &TweenableRef {
        &self.target
    }

    pub fn reset(&mut self) {
        self.state = NodeState::Pending;
        self.elapsed = 0.0;
        self.start.clear();
    }

    pub fn advance(&mut self, dt: f32) -> crate::Result<f32> {
        check_time_step(dt)?;
        if self.state.is_done() {
            return Ok(dt);
        }
        if self.state == NodeState::Pending {
            self.capture_start()?;
            self.state = NodeState::Running;
        }

        let (elapsed, leftover, finished) = step_clock(self.elapsed, dt, self.duration);

        // Land exactly on the end values; float lerp at t == 1 can be off by an ulp.
        let mut values = std::mem::take(&mut self.scratch);
        if finished {
            values.clear();
            values.extend_from_slice(&self.end);
        } else {
            let eased = self.easing.progress(elapsed / self.duration);
            lerp_components(&self.start, &self.end, eased, &mut values);
        }
        let written = self.write(&values);
        self.scratch = values;
        written?;

        self.elapsed = elapsed;
        if finished {
            self.state = NodeState::Done;
            fire(&mut self.on_complete);
        }
        Ok(leftover)
    }

    fn capture_start(&mut self) -> crate::Result<()> {
        let expected = self.channel.arity();
        if self.end.len() != expected {
            return Err(TweenError::ArityMismatch {
                channel: self.channel,
                expected,
                actual: self.end.len(),
            });
        }
        let start = {
            let target = self
                .target
                .try_borrow()
                .map_err(|_| TweenError::TargetBusy)?;
            target.read(self.channel)
        };
        if start.len() != expected {
            return Err(TweenError::ArityMismatch {
                channel: self.channel,
                expected,
                actual: start.len(),
            });
        }
        self.start = start;
        Ok(())
    }

    fn write(&self, values: &[f32]) -> crate::Result<()> {
        let mut target = self
            .target
            .try_borrow_mut()
            .map_err(|_| TweenError::TargetBusy)?;
        target.write(self.channel, values);
        Ok(())
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("label", &self.label)
            .field("channel", &self.channel)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("has_on_complete", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}
