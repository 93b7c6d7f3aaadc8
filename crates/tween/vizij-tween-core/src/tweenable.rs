//! The tweenable capability and a few ready-made targets.
//!
//! The engine never owns a target: it keeps a [`TweenableRef`] and borrows it
//! only for the duration of a single read or write.

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::channel::ChannelKind;

/// Anything whose numeric properties can be driven by a tween.
///
/// `read` returns the current value decomposed into `channel.arity()`
/// components in a fixed order; `write` applies a vector of the same shape.
/// The engine checks lengths and reports `ArityMismatch` itself, so
/// implementations may return an empty vector for channels they do not carry.
pub trait Tweenable {
    fn read(&self, channel: ChannelKind) -> Vec<f32>;
    fn write(&mut self, channel: ChannelKind, values: &[f32]);
}

/// Shared, single-threaded handle to a tween target.
pub type TweenableRef = Rc<RefCell<dyn Tweenable>>;

/// Wrap a value into a shared handle usable both by the host and as a
/// [`TweenableRef`] (via unsized coercion).
pub fn shared<T: Tweenable + 'static>(value: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(value))
}

/// Generic property store keyed by channel.
///
/// Unset channels read as zeros of the channel's arity. Every write is
/// counted, which hosts and tests use to observe whether a tick touched the
/// target at all.
#[derive(Clone, Debug, Default)]
pub struct PropertyBag {
    values: HashMap<ChannelKind, Vec<f32>>,
    writes: usize,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style initial value.
    pub fn with(mut self, channel: ChannelKind, values: impl Into<Vec<f32>>) -> Self {
        self.values.insert(channel, values.into());
        self
    }

    pub fn get(&self, channel: ChannelKind) -> Option<&[f32]> {
        self.values.get(&channel).map(Vec::as_slice)
    }

    /// Set a value without counting it as an engine write.
    pub fn set(&mut self, channel: ChannelKind, values: impl Into<Vec<f32>>) {
        self.values.insert(channel, values.into());
    }

    #[inline]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Tweenable for PropertyBag {
    fn read(&self, channel: ChannelKind) -> Vec<f32> {
        match self.values.get(&channel) {
            Some(v) => v.clone(),
            None => vec![0.0; channel.arity()],
        }
    }

    fn write(&mut self, channel: ChannelKind, values: &[f32]) {
        self.writes += 1;
        match self.values.get_mut(&channel) {
            Some(slot) => {
                slot.clear();
                slot.extend_from_slice(values);
            }
            None => {
                self.values.insert(channel, values.to_vec());
            }
        }
    }
}

/// A bare scalar answers every channel with its single component.
impl Tweenable for f32 {
    fn read(&self, _channel: ChannelKind) -> Vec<f32> {
        vec![*self]
    }

    fn write(&mut self, _channel: ChannelKind, values: &[f32]) {
        if let [v] = values {
            *self = *v;
        }
    }
}

impl<const N: usize> Tweenable for [f32; N] {
    fn read(&self, _channel: ChannelKind) -> Vec<f32> {
        self.to_vec()
    }

    fn write(&mut self, _channel: ChannelKind, values: &[f32]) {
        if values.len() == N {
            self.copy_from_slice(values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_bag_defaults_to_zeros() {
        let bag = PropertyBag::new();
        assert_eq!(bag.read(ChannelKind::Color), vec![0.0; 4]);
        assert_eq!(bag.get(ChannelKind::Color), None);
    }

    #[test]
    fn property_bag_counts_writes_only() {
        let mut bag = PropertyBag::new().with(ChannelKind::Position2, [1.0, 2.0]);
        bag.set(ChannelKind::Opacity, [0.5]);
        assert_eq!(bag.write_count(), 0);
        bag.write(ChannelKind::Position2, &[3.0, 4.0]);
        assert_eq!(bag.write_count(), 1);
        assert_eq!(bag.get(ChannelKind::Position2), Some(&[3.0, 4.0][..]));
    }

    #[test]
    fn shared_handle_coerces_to_tweenable_ref() {
        let value = shared([1.0f32, 2.0, 3.0]);
        let target: TweenableRef = value.clone();
        target
            .borrow_mut()
            .write(ChannelKind::Position3, &[4.0, 5.0, 6.0]);
        assert_eq!(*value.borrow(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn fixed_array_ignores_wrong_length_writes() {
        let mut v = [0.0f32; 2];
        v.write(ChannelKind::Position2, &[1.0]);
        assert_eq!(v, [0.0, 0.0]);
    }
}
