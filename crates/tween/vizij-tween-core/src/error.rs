//! Error types for the tween engine

use serde::{Deserialize, Serialize};

use crate::channel::ChannelKind;

/// Errors raised while building or advancing tween nodes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TweenError {
    /// Leaf or delay constructed with a non-positive (or non-finite) duration
    #[error("Invalid duration: {duration} (must be > 0)")]
    InvalidDuration { duration: f32 },

    /// Value vector length disagrees with the channel's arity
    #[error("Arity mismatch on channel {channel:?}: expected {expected}, got {actual}")]
    ArityMismatch {
        channel: ChannelKind,
        expected: usize,
        actual: usize,
    },

    /// Negative or non-finite time step
    #[error("Invalid time step: {dt}")]
    InvalidTimeStep { dt: f32 },

    /// The tween target was already borrowed when the engine needed it
    #[error("Tween target is already borrowed")]
    TargetBusy,

    /// A stored tween referenced a target path nobody could resolve
    #[error("Unknown tween target: {path}")]
    UnknownTarget { path: String },

    /// A spawner outlived the manager it feeds
    #[error("Tween manager has been dropped")]
    ManagerDropped,

    /// Configuration failed validation
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl TweenError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } | Self::InvalidConfig { .. } => "construction",
            Self::ArityMismatch { .. } | Self::InvalidTimeStep { .. } => "validation",
            Self::TargetBusy | Self::UnknownTarget { .. } => "target",
            Self::ManagerDropped => "manager",
            Self::SerializationError { .. } => "serialization",
        }
    }

    /// Errors that only abort the current tick; retrying later can succeed.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TargetBusy | Self::InvalidTimeStep { .. })
    }
}

impl From<serde_json::Error> for TweenError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject negative, NaN and infinite steps.
#[inline]
pub(crate) fn check_time_step(dt: f32) -> crate::Result<()> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(TweenError::InvalidTimeStep { dt })
    }
}

/// Durations must be strictly positive and finite.
#[inline]
pub(crate) fn check_duration(duration: f32) -> crate::Result<()> {
    if duration.is_finite() && duration > 0.0 {
        Ok(())
    } else {
        Err(TweenError::InvalidDuration { duration })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_step_validation() {
        assert!(check_time_step(0.0).is_ok());
        assert!(check_time_step(0.016).is_ok());
        assert_eq!(
            check_time_step(-0.5),
            Err(TweenError::InvalidTimeStep { dt: -0.5 })
        );
        assert!(check_time_step(f32::NAN).is_err());
        assert!(check_time_step(f32::INFINITY).is_err());
    }

    #[test]
    fn test_duration_validation() {
        assert!(check_duration(1.0).is_ok());
        assert!(check_duration(0.0).is_err());
        assert!(check_duration(-2.0).is_err());
    }

    #[test]
    fn test_error_categories() {
        let err = TweenError::ArityMismatch {
            channel: ChannelKind::Position2,
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.category(), "validation");
        assert!(!err.is_recoverable());
        assert!(TweenError::TargetBusy.is_recoverable());
    }

    #[test]
    fn test_serialization() {
        let error = TweenError::UnknownTarget {
            path: "bars/0".to_string(),
        };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: TweenError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
