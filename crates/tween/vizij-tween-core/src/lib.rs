//! Vizij Tween Core (engine-agnostic)
//!
//! Tick-driven tween scheduling: leaf tweens interpolate one channel of a
//! [`Tweenable`] target, serial/parallel groups compose them into trees, and a
//! [`TweenManager`] advances all registered roots once per host frame.
//!
//! The crate holds no clock: hosts pass the frame delta to
//! [`TweenManager::advance`]. Everything is single-threaded; targets are shared
//! through `Rc<RefCell<_>>` handles ([`TweenableRef`]).

pub mod binding;
pub mod channel;
pub mod config;
pub mod easing;
pub mod error;
pub mod ids;
pub mod interp;
pub mod manager;
pub mod node;
pub mod outputs;
pub mod stored_tween;
pub mod tweenable;

// Re-exports for consumers (hosts, chart widgets)
pub use binding::{TargetRegistry, TargetResolver};
pub use channel::ChannelKind;
pub use config::{Config, ErrorPolicy};
pub use easing::{Ease, Easing};
pub use error::TweenError;
pub use ids::NodeId;
pub use manager::{Spawner, TweenManager};
pub use node::{
    make_delay, make_parallel_group, make_serial_group, make_tween, Callback, Delay, Group,
    GroupMode, Node, NodeState, Tween,
};
pub use outputs::{TickReport, TweenEvent};
pub use stored_tween::{parse_stored_tween_json, StoredNode};
pub use tweenable::{shared, PropertyBag, Tweenable, TweenableRef};

/// Tween engine result type
pub type Result<T> = core::result::Result<T, TweenError>;
