//! Manager: registry of root nodes advanced once per host tick.
//!
//! Per tick:
//! 1. adopt nodes queued through a [`Spawner`] since the previous tick
//! 2. advance every root in insertion order, isolating failures
//! 3. prune roots that are Done after the full pass
//!
//! Completion callbacks cannot reach the manager directly (it is mutably
//! borrowed while they run); they capture a [`Spawner`] instead, and whatever
//! they queue starts on the following tick.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::{Config, ErrorPolicy};
use crate::error::{check_time_step, TweenError};
use crate::ids::{IdAllocator, NodeId};
use crate::node::{Node, NodeState};
use crate::outputs::{TickReport, TweenEvent};

type SpawnQueue = RefCell<Vec<Node>>;

/// Cloneable handle for queueing nodes from inside callbacks.
#[derive(Clone, Debug)]
pub struct Spawner {
    queue: Weak<SpawnQueue>,
}

impl Spawner {
    /// Queue a node; it becomes a root at the start of the next advance.
    pub fn spawn(&self, node: impl Into<Node>) -> crate::Result<()> {
        let queue = self.queue.upgrade().ok_or(TweenError::ManagerDropped)?;
        queue.borrow_mut().push(node.into());
        Ok(())
    }
}

#[derive(Debug)]
struct Root {
    id: NodeId,
    node: Node,
}

#[derive(Debug)]
pub struct TweenManager {
    cfg: Config,
    ids: IdAllocator,
    roots: Vec<Root>,
    spawned: Rc<SpawnQueue>,
    paused: bool,

    // Per-tick outputs
    report: TickReport,
    dropped: Vec<NodeId>,
}

impl Default for TweenManager {
    fn default() -> Self {
        Self::with_valid_config(Config::default())
    }
}

impl TweenManager {
    /// Fails with `InvalidConfig` when `cfg` does not pass [`Config::validate`].
    pub fn new(cfg: Config) -> crate::Result<Self> {
        cfg.validate()?;
        Ok(Self::with_valid_config(cfg))
    }

    fn with_valid_config(cfg: Config) -> Self {
        Self {
            roots: Vec::with_capacity(cfg.roots_capacity),
            cfg,
            ids: IdAllocator::new(),
            spawned: Rc::new(RefCell::new(Vec::new())),
            paused: false,
            report: TickReport::default(),
            dropped: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Append a root. Done nodes are accepted and pruned silently on the next tick.
    pub fn add(&mut self, node: impl Into<Node>) -> NodeId {
        let id = self.ids.alloc_node();
        let node = node.into();
        log::debug!(
            "tween root {:?} added (label={:?}, duration={})",
            id,
            node.label(),
            node.duration()
        );
        self.roots.push(Root { id, node });
        id
    }

    pub fn spawner(&self) -> Spawner {
        Spawner {
            queue: Rc::downgrade(&self.spawned),
        }
    }

    /// Cancel a root between ticks. Its callbacks never fire.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.roots.iter().position(|r| r.id == id)?;
        log::debug!("tween root {:?} removed", id);
        Some(self.roots.remove(idx).node)
    }

    /// Discard every root and queued spawn without firing callbacks.
    pub fn clear(&mut self) {
        let queued = self.spawned.borrow_mut().drain(..).count();
        log::debug!(
            "tween manager cleared ({} roots, {} queued)",
            self.roots.len(),
            queued
        );
        self.roots.clear();
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.roots.iter().find(|r| r.id == id).map(|r| &r.node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.roots.iter_mut().find(|r| r.id == id).map(|r| &mut r.node)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.roots.iter().any(|r| r.id == id)
    }

    /// Active root ids in dispatch order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.roots.iter().map(|r| r.id).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Nodes queued by spawners and not yet adopted.
    pub fn pending_spawns(&self) -> usize {
        self.spawned.borrow().len()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Report of the most recent advance.
    pub fn report(&self) -> &TickReport {
        &self.report
    }

    /// Step every root by `dt` seconds (host clock).
    ///
    /// Only an invalid `dt` fails the call; per-root failures are logged,
    /// recorded as `TweenEvent::Failed` and handled per `Config::error_policy`.
    pub fn advance(&mut self, dt: f32) -> crate::Result<&TickReport> {
        check_time_step(dt)?;
        self.report.clear();
        self.adopt_spawned();
        if self.paused {
            return Ok(&self.report);
        }

        let step = self.cfg.effective_step(dt);
        let cap = self.cfg.max_events_per_tick;
        log::trace!("tween tick dt={} step={} roots={}", dt, step, self.roots.len());

        self.dropped.clear();
        for root in self.roots.iter_mut() {
            let before = root.node.state();
            if before.is_done() {
                continue;
            }
            match root.node.advance(step) {
                Ok(_) => {
                    if before == NodeState::Pending && root.node.state() != NodeState::Pending {
                        self.report
                            .push_event(TweenEvent::Started { node: root.id }, cap);
                    }
                    if root.node.is_done() {
                        self.report
                            .push_event(TweenEvent::Completed { node: root.id }, cap);
                    }
                }
                Err(error) => {
                    log::warn!(
                        "tween root {:?} (label={:?}) failed [{}]: {}",
                        root.id,
                        root.node.label(),
                        error.category(),
                        error
                    );
                    if self.cfg.error_policy == ErrorPolicy::Drop {
                        self.dropped.push(root.id);
                    }
                    self.report.push_event(
                        TweenEvent::Failed {
                            node: root.id,
                            error,
                        },
                        cap,
                    );
                }
            }
        }

        let dropped = &self.dropped;
        self.roots
            .retain(|r| !r.node.is_done() && !dropped.contains(&r.id));

        Ok(&self.report)
    }

    fn adopt_spawned(&mut self) {
        let spawned: Vec<Node> = self.spawned.borrow_mut().drain(..).collect();
        for node in spawned {
            let id = self.add(node);
            self.report
                .push_event(TweenEvent::Adopted { node: id }, self.cfg.max_events_per_tick);
        }
    }
}
