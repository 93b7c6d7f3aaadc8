//! Data-driven tween trees.
//!
//! JSON shape (internally tagged by `"type"`):
//!
//! ```json
//! { "type": "serial", "label": "intro", "children": [
//!     { "type": "delay", "duration": 0.1 },
//!     { "type": "parallel", "children": [
//!         { "type": "tween", "target": "bars/0", "channel": "scale2",
//!           "duration": 0.5, "easing": "quad_out", "to": [1.0, 1.0] },
//!         { "type": "tween", "target": "bars/0", "channel": "opacity",
//!           "duration": 0.25, "to": [1.0] }
//!     ] }
//! ] }
//! ```
//!
//! Callbacks cannot be expressed in data; attach them to the built node with
//! `Node::set_on_complete` if needed.

use serde::{Deserialize, Serialize};

use crate::binding::TargetResolver;
use crate::channel::ChannelKind;
use crate::easing::Easing;
use crate::error::TweenError;
use crate::node::{Delay, Group, GroupMode, Node, Tween};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoredNode {
    Tween {
        target: String,
        channel: ChannelKind,
        duration: f32,
        #[serde(default)]
        easing: Easing,
        to: Vec<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Delay {
        duration: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Serial {
        #[serde(default)]
        children: Vec<StoredNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    Parallel {
        #[serde(default)]
        children: Vec<StoredNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

/// Public API: parse a stored tween tree from JSON.
pub fn parse_stored_tween_json(s: &str) -> crate::Result<StoredNode> {
    Ok(serde_json::from_str(s)?)
}

impl StoredNode {
    /// Planned duration, computed without resolving any target.
    pub fn duration(&self) -> f32 {
        match self {
            StoredNode::Tween { duration, .. } | StoredNode::Delay { duration, .. } => *duration,
            StoredNode::Serial { children, .. } => children.iter().map(StoredNode::duration).sum(),
            StoredNode::Parallel { children, .. } => children
                .iter()
                .map(StoredNode::duration)
                .fold(0.0, f32::max),
        }
    }

    /// Resolve targets and build a runnable node.
    ///
    /// Nothing is returned unless the whole tree builds; the first failure
    /// (unknown path, invalid duration) aborts construction.
    pub fn build(&self, resolver: &mut dyn TargetResolver) -> crate::Result<Node> {
        match self {
            StoredNode::Tween {
                target,
                channel,
                duration,
                easing,
                to,
                label,
            } => {
                let handle = resolver
                    .resolve(target)
                    .ok_or_else(|| TweenError::UnknownTarget {
                        path: target.clone(),
                    })?;
                let mut tween = Tween::new(handle, *channel, *duration, *easing, to.clone())?;
                if let Some(label) = label {
                    tween = tween.with_label(label.clone());
                }
                Ok(Node::Tween(tween))
            }
            StoredNode::Delay { duration, label } => {
                let mut delay = Delay::new(*duration)?;
                if let Some(label) = label {
                    delay = delay.with_label(label.clone());
                }
                Ok(Node::Delay(delay))
            }
            StoredNode::Serial { children, label } => {
                build_group(GroupMode::Serial, children, label.as_deref(), resolver)
            }
            StoredNode::Parallel { children, label } => {
                build_group(GroupMode::Parallel, children, label.as_deref(), resolver)
            }
        }
    }
}

fn build_group(
    mode: GroupMode,
    children: &[StoredNode],
    label: Option<&str>,
    resolver: &mut dyn TargetResolver,
) -> crate::Result<Node> {
    let children = children
        .iter()
        .map(|c| c.build(resolver))
        .collect::<crate::Result<Vec<Node>>>()?;
    let mut group = Group::new(mode, children);
    if let Some(label) = label {
        group = group.with_label(label);
    }
    Ok(Node::Group(group))
}
