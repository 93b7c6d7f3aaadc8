//! Target resolution for data-driven tween trees.
//!
//! Stored tween trees name their targets by path (e.g. `"bars/3"`). Hosts
//! implement [`TargetResolver`] to turn those paths into live handles, or
//! register handles up front in a [`TargetRegistry`].

use std::fmt;

use hashbrown::HashMap;

use crate::tweenable::TweenableRef;

/// Trait for resolving canonical target paths to tweenable handles.
pub trait TargetResolver {
    fn resolve(&mut self, path: &str) -> Option<TweenableRef>;
}

/// Path-keyed table of tween targets.
#[derive(Default, Clone)]
pub struct TargetRegistry {
    targets: HashMap<String, TweenableRef>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the handle registered under `path`.
    pub fn register(&mut self, path: impl Into<String>, target: TweenableRef) {
        self.targets.insert(path.into(), target);
    }

    pub fn unregister(&mut self, path: &str) -> Option<TweenableRef> {
        self.targets.remove(path)
    }

    pub fn get(&self, path: &str) -> Option<&TweenableRef> {
        self.targets.get(path)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl TargetResolver for TargetRegistry {
    fn resolve(&mut self, path: &str) -> Option<TweenableRef> {
        self.targets.get(path).cloned()
    }
}

impl fmt::Debug for TargetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&str> = self.targets.keys().map(String::as_str).collect();
        paths.sort_unstable();
        f.debug_struct("TargetRegistry")
            .field("paths", &paths)
            .finish()
    }
}
