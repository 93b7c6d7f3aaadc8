//! Channel kinds: which numeric property set a tween animates.

use serde::{Deserialize, Serialize};

/// Identifies an animatable property and, through [`ChannelKind::arity`], the
/// number of components exchanged with a [`Tweenable`](crate::Tweenable).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Scalar,
    Opacity,
    /// Rotation angle in radians.
    Rotation,
    Position2,
    Scale2,
    /// Width and height.
    Size,
    Position3,
    Scale3,
    /// RGBA in 0..1.
    Color,
    /// Host-defined channel with an explicit arity.
    Custom { id: u16, arity: u8 },
}

impl ChannelKind {
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            ChannelKind::Scalar | ChannelKind::Opacity | ChannelKind::Rotation => 1,
            ChannelKind::Position2 | ChannelKind::Scale2 | ChannelKind::Size => 2,
            ChannelKind::Position3 | ChannelKind::Scale3 => 3,
            ChannelKind::Color => 4,
            ChannelKind::Custom { arity, .. } => *arity as usize,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            ChannelKind::Scalar => "scalar",
            ChannelKind::Opacity => "opacity",
            ChannelKind::Rotation => "rotation",
            ChannelKind::Position2 => "position2",
            ChannelKind::Scale2 => "scale2",
            ChannelKind::Size => "size",
            ChannelKind::Position3 => "position3",
            ChannelKind::Scale3 => "scale3",
            ChannelKind::Color => "color",
            ChannelKind::Custom { .. } => "custom",
        }
    }
}
