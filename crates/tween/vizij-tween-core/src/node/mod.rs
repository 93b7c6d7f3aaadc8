//! Animation nodes: a closed set of leaf and composite variants sharing one
//! `advance` operation.
//!
//! `advance(dt)` returns the leftover time the node did not need, which serial
//! groups feed into the next child within the same tick.

pub mod delay;
pub mod group;
pub mod tween;

use serde::{Deserialize, Serialize};

pub use delay::Delay;
pub use group::{Group, GroupMode};
pub use tween::Tween;

use crate::channel::ChannelKind;
use crate::easing::Ease;
use crate::tweenable::TweenableRef;

/// Completion hook. Fires once per run, after the node has fully settled.
pub type Callback = Box<dyn FnMut()>;

/// Lifecycle of any node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    #[default]
    Pending,
    Running,
    Done,
}

impl NodeState {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

/// One node of a tween tree.
#[derive(Debug)]
pub enum Node {
    Tween(Tween),
    Delay(Delay),
    Group(Group),
}

impl Node {
    /// Advance by `dt` seconds and return the unused remainder.
    /// Done nodes are left untouched and hand back the whole `dt`.
    pub fn advance(&mut self, dt: f32) -> crate::Result<f32> {
        match self {
            Node::Tween(t) => t.advance(dt),
            Node::Delay(d) => d.advance(dt),
            Node::Group(g) => g.advance(dt),
        }
    }

    #[inline]
    pub fn state(&self) -> NodeState {
        match self {
            Node::Tween(t) => t.state(),
            Node::Delay(d) => d.state(),
            Node::Group(g) => g.state(),
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state().is_done()
    }

    /// Planned duration: leaf duration, sum (serial) or max (parallel) of children.
    pub fn duration(&self) -> f32 {
        match self {
            Node::Tween(t) => t.duration(),
            Node::Delay(d) => d.duration(),
            Node::Group(g) => g.duration(),
        }
    }

    pub fn elapsed(&self) -> f32 {
        match self {
            Node::Tween(t) => t.elapsed(),
            Node::Delay(d) => d.elapsed(),
            Node::Group(g) => g.elapsed(),
        }
    }

    /// Normalized elapsed time in [0, 1].
    pub fn progress(&self) -> f32 {
        match self {
            Node::Tween(t) => t.progress(),
            Node::Delay(d) => d.progress(),
            Node::Group(g) => g.progress(),
        }
    }

    /// Return to `Pending`; leaves recapture their start values on the next advance.
    pub fn reset(&mut self) {
        match self {
            Node::Tween(t) => t.reset(),
            Node::Delay(d) => d.reset(),
            Node::Group(g) => g.reset(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Node::Tween(t) => t.label(),
            Node::Delay(d) => d.label(),
            Node::Group(g) => g.label(),
        }
    }

    pub fn set_on_complete(&mut self, callback: Option<Callback>) {
        match self {
            Node::Tween(t) => t.set_on_complete(callback),
            Node::Delay(d) => d.set_on_complete(callback),
            Node::Group(g) => g.set_on_complete(callback),
        }
    }

    pub fn as_tween(&self) -> Option<&Tween> {
        match self {
            Node::Tween(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl From<Tween> for Node {
    fn from(t: Tween) -> Self {
        Node::Tween(t)
    }
}

impl From<Delay> for Node {
    fn from(d: Delay) -> Self {
        Node::Delay(d)
    }
}

impl From<Group> for Node {
    fn from(g: Group) -> Self {
        Node::Group(g)
    }
}

/// Relative slack under which accumulated elapsed time counts as complete.
/// Frame deltas such as 1/60 do not sum to the duration exactly in f32.
pub(crate) const COMPLETION_TOLERANCE: f32 = 1e-4;

/// Advance a leaf clock. Returns `(elapsed, leftover, finished)`; a finished
/// clock is clamped to `duration` exactly.
#[inline]
pub(crate) fn step_clock(before: f32, dt: f32, duration: f32) -> (f32, f32, bool) {
    let raw = before + dt;
    let leftover = (dt - (duration - before)).max(0.0);
    if raw >= duration * (1.0 - COMPLETION_TOLERANCE) {
        (duration, leftover, true)
    } else {
        (raw, leftover, false)
    }
}

/// Run a completion hook if one is attached.
#[inline]
pub(crate) fn fire(callback: &mut Option<Callback>) {
    if let Some(cb) = callback.as_mut() {
        cb();
    }
}

/// Build a leaf tween node. Fails with `InvalidDuration` when `duration <= 0`.
pub fn make_tween(
    target: TweenableRef,
    channel: ChannelKind,
    duration: f32,
    easing: impl Ease + 'static,
    end_values: impl Into<Vec<f32>>,
    on_complete: Option<Callback>,
) -> crate::Result<Node> {
    let mut tween = Tween::new(target, channel, duration, easing, end_values)?;
    tween.set_on_complete(on_complete);
    Ok(Node::Tween(tween))
}

/// Build a group whose children run one after another.
pub fn make_serial_group(children: Vec<Node>, on_complete: Option<Callback>) -> Node {
    let mut group = Group::serial(children);
    group.set_on_complete(on_complete);
    Node::Group(group)
}

/// Build a group whose children run concurrently.
pub fn make_parallel_group(children: Vec<Node>, on_complete: Option<Callback>) -> Node {
    let mut group = Group::parallel(children);
    group.set_on_complete(on_complete);
    Node::Group(group)
}

/// Build a wait node. Fails with `InvalidDuration` when `duration <= 0`.
pub fn make_delay(duration: f32, on_complete: Option<Callback>) -> crate::Result<Node> {
    let mut delay = Delay::new(duration)?;
    delay.set_on_complete(on_complete);
    Ok(Node::Delay(delay))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_steps_reach_duration() {
        for (duration, frames) in [(1.0f32, 60), (2.0, 120), (0.5, 30), (60.0, 3600)] {
            let dt = 1.0 / 60.0;
            let mut elapsed = 0.0;
            let mut finished_at = None;
            for frame in 1..=frames {
                let (next, _, finished) = step_clock(elapsed, dt, duration);
                elapsed = next;
                if finished {
                    finished_at = Some(frame);
                    break;
                }
            }
            assert_eq!(finished_at, Some(frames), "duration={duration}");
            assert_eq!(elapsed, duration);
        }
    }

    #[test]
    fn one_frame_short_is_not_finished() {
        let (elapsed, leftover, finished) = step_clock(0.0, 59.0 / 60.0, 1.0);
        assert!(!finished);
        assert!(elapsed < 1.0);
        assert_eq!(leftover, 0.0);
    }
}
