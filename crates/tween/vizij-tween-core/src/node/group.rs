//! Composite nodes.
//!
//! Serial: children run left to right; time a child did not need is fed to
//! the next child within the same advance, so one large step may finish
//! several short children.
//!
//! Parallel: every unfinished child receives the same `dt`; per-child
//! leftovers are discarded.
//!
//! Both complete when every child is Done. An empty group completes on its
//! first advance without consuming time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::check_time_step;
use crate::node::{fire, Callback, Node, NodeState};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    Serial,
    Parallel,
}

pub struct Group {
    mode: GroupMode,
    children: Vec<Node>,
    state: NodeState,
    on_complete: Option<Callback>,
    label: Option<String>,
}

impl Group {
    pub fn new(mode: GroupMode, children: Vec<Node>) -> Self {
        Self {
            mode,
            children,
            state: NodeState::Pending,
            on_complete: None,
            label: None,
        }
    }

    pub fn serial(children: Vec<Node>) -> Self {
        Self::new(GroupMode::Serial, children)
    }

    pub fn parallel(children: Vec<Node>) -> Self {
        Self::new(GroupMode::Parallel, children)
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
    pub fn mode(&self) -> GroupMode {
        self.mode
    }

    #[inline]
    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Detach a child between ticks. The child's callback never fires.
    pub fn remove_child(&mut self, index: usize) -> Option<Node> {
        if index >= self.children.len() {
            return None;
        }
        Some(self.children.remove(index))
    }

    /// Sum of children (serial) or max of children (parallel).
    pub fn duration(&self) -> f32 {
        let durations = self.children.iter().map(Node::duration);
        match self.mode {
            GroupMode::Serial => durations.sum(),
            GroupMode::Parallel => durations.fold(0.0, f32::max),
        }
    }

    pub fn elapsed(&self) -> f32 {
        let elapsed = self.children.iter().map(Node::elapsed);
        match self.mode {
            GroupMode::Serial => elapsed.sum(),
            GroupMode::Parallel => elapsed.fold(0.0, f32::max),
        }
    }

    pub fn progress(&self) -> f32 {
        let duration = self.duration();
        if duration > 0.0 {
            (self.elapsed() / duration).min(1.0)
        } else if self.state.is_done() {
            1.0
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.state = NodeState::Pending;
        for child in &mut self.children {
            child.reset();
        }
    }

    pub fn advance(&mut self, dt: f32) -> crate::Result<f32> {
        check_time_step(dt)?;
        if self.state.is_done() {
            return Ok(dt);
        }
        self.state = NodeState::Running;

        let leftover = match self.mode {
            GroupMode::Serial => self.advance_serial(dt)?,
            GroupMode::Parallel => self.advance_parallel(dt)?,
        };

        if self.children.iter().all(Node::is_done) {
            self.state = NodeState::Done;
            fire(&mut self.on_complete);
            Ok(leftover)
        } else {
            Ok(0.0)
        }
    }

    /// Feeds the first unfinished child, wherever it sits; a child reset
    /// through `child_mut` runs again before its later siblings.
    fn advance_serial(&mut self, dt: f32) -> crate::Result<f32> {
        let mut remaining = dt;
        for child in self.children.iter_mut().filter(|c| !c.is_done()) {
            remaining = child.advance(remaining)?;
            if !child.is_done() {
                return Ok(0.0);
            }
            if remaining <= 0.0 {
                break;
            }
        }
        Ok(remaining)
    }

    /// Advances every unfinished child even when one of them fails, then
    /// reports the first failure.
    fn advance_parallel(&mut self, dt: f32) -> crate::Result<f32> {
        let mut leftover = dt;
        let mut first_err = None;
        for child in self.children.iter_mut().filter(|c| !c.is_done()) {
            match child.advance(dt) {
                Ok(rest) => leftover = leftover.min(rest),
                Err(err) => {
                    leftover = 0.0;
                    first_err.get_or_insert(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(leftover),
        }
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("label", &self.label)
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
