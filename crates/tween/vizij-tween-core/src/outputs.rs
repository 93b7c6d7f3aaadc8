//! Per-tick report produced by the manager.
//!
//! Target values are written straight into the tweenables; the report only
//! carries lifecycle events so hosts can log, count or react to them.

use serde::{Deserialize, Serialize};

use crate::error::TweenError;
use crate::ids::NodeId;

/// Lifecycle signals emitted during one `advance`, in occurrence order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TweenEvent {
    /// A node queued through a Spawner became a root.
    Adopted { node: NodeId },
    /// A root left `Pending` during this tick.
    Started { node: NodeId },
    /// A root reached `Done`; it is pruned at the end of the tick.
    Completed { node: NodeId },
    /// A root's advance failed; other roots were unaffected.
    Failed { node: NodeId, error: TweenError },
}

/// Returned by `TweenManager::advance()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TickReport {
    #[serde(default)]
    pub events: Vec<TweenEvent>,
    /// Events beyond `Config::max_events_per_tick`, counted but not kept.
    #[serde(default)]
    pub dropped_events: usize,
}

impl TickReport {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped_events = 0;
    }

    #[inline]
    pub(crate) fn push_event(&mut self, event: TweenEvent, cap: usize) {
        if self.events.len() < cap {
            self.events.push(event);
        } else {
            self.dropped_events += 1;
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.dropped_events == 0
    }

    pub fn completed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.events.iter().filter_map(|e| match e {
            TweenEvent::Completed { node } => Some(*node),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (NodeId, &TweenError)> + '_ {
        self.events.iter().filter_map(|e| match e {
            TweenEvent::Failed { node, error } => Some((*node, error)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_counts_overflow_and_filters_by_kind() {
        let mut report = TickReport::default();
        report.push_event(TweenEvent::Started { node: NodeId(0) }, 2);
        report.push_event(
            TweenEvent::Failed {
                node: NodeId(1),
                error: TweenError::TargetBusy,
            },
            2,
        );
        report.push_event(TweenEvent::Completed { node: NodeId(0) }, 2);
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.dropped_events, 1);
        assert_eq!(report.completed().count(), 0);
        assert_eq!(report.failures().map(|(id, _)| id).collect::<Vec<_>>(), vec![NodeId(1)]);

        report.clear();
        assert!(report.is_empty());
    }
}
