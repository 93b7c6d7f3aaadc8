//! Manager configuration.

use serde::{Deserialize, Serialize};

use crate::error::TweenError;

/// What the manager does with a root whose advance failed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Keep the root and retry it on the next tick.
    #[default]
    Retain,
    /// Remove the root after the pass, without firing callbacks.
    Drop,
}

/// Configuration for the tween manager.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Multiplier applied to every host-supplied `dt`.
    pub time_scale: f32,
    /// Upper bound for a single (scaled) step; `None` disables clamping.
    pub max_step: Option<f32>,
    pub error_policy: ErrorPolicy,

    /// Initial capacity hint for the root list.
    pub roots_capacity: usize,
    /// Maximum events retained in one TickReport; the rest are only counted.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_step: None,
            error_policy: ErrorPolicy::Retain,
            roots_capacity: 64,
            max_events_per_tick: 1024,
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> crate::Result<Self> {
        let cfg: Config = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(TweenError::InvalidConfig {
                reason: format!("time_scale must be finite and >= 0, got {}", self.time_scale),
            });
        }
        if let Some(max) = self.max_step {
            if !max.is_finite() || max <= 0.0 {
                return Err(TweenError::InvalidConfig {
                    reason: format!("max_step must be finite and > 0, got {max}"),
                });
            }
        }
        Ok(())
    }

    /// Scale and clamp a host step.
    #[inline]
    pub(crate) fn effective_step(&self, dt: f32) -> f32 {
        let scaled = dt * self.time_scale;
        match self.max_step {
            Some(max) => scaled.min(max),
            None => scaled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = Config::from_json_str(r#"{ "max_step": 0.1, "error_policy": "drop" }"#).unwrap();
        assert_eq!(cfg.max_step, Some(0.1));
        assert_eq!(cfg.error_policy, ErrorPolicy::Drop);
        assert_eq!(cfg.time_scale, 1.0);
        assert_eq!(cfg.max_events_per_tick, 1024);
    }

    #[test]
    fn rejects_negative_time_scale() {
        let err = Config::from_json_str(r#"{ "time_scale": -1.0 }"#).unwrap_err();
        assert_eq!(err.category(), "construction");
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = Config::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, TweenError::SerializationError { .. }));
    }

    #[test]
    fn effective_step_scales_then_clamps() {
        let cfg = Config {
            time_scale: 2.0,
            max_step: Some(0.5),
            ..Config::default()
        };
        assert_eq!(cfg.effective_step(0.1), 0.2);
        assert_eq!(cfg.effective_step(1.0), 0.5);
    }
}
