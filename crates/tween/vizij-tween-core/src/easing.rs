//! Easing curves: pure maps from normalized time to normalized progress.
//!
//! - [`Ease`] is the strategy trait a leaf tween holds
//! - [`Easing`] is the built-in, serializable family (Penner curves + cubic bezier)
//! - any `Fn(f32) -> f32` closure is an [`Ease`] as well
//!
//! Built-in curves pin the endpoints: `t <= 0` yields exactly 0 and `t >= 1`
//! yields exactly 1. Elastic and back curves overshoot in between.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Time-to-progress strategy.
pub trait Ease {
    fn progress(&self, t: f32) -> f32;
}

impl<F> Ease for F
where
    F: Fn(f32) -> f32,
{
    #[inline]
    fn progress(&self, t: f32) -> f32 {
        self(t)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    /// CSS-style timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Every parameterless curve, in declaration order.
    pub const NAMED: [Easing; 19] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
    ];

    /// Curves whose output leaves [0, 1] between the endpoints.
    #[inline]
    pub fn overshoots(&self) -> bool {
        match self {
            Easing::ElasticIn
            | Easing::ElasticOut
            | Easing::ElasticInOut
            | Easing::BackIn
            | Easing::BackOut
            | Easing::BackInOut => true,
            Easing::CubicBezier { y1, y2, .. } => {
                !(0.0..=1.0).contains(y1) || !(0.0..=1.0).contains(y2)
            }
            _ => false,
        }
    }

    fn eval(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ElasticIn => {
                let c4 = (2.0 * PI) / 3.0;
                -(2.0f32.powf(10.0 * t - 10.0)) * ((10.0 * t - 10.75) * c4).sin()
            }
            Easing::ElasticOut => {
                let c4 = (2.0 * PI) / 3.0;
                2.0f32.powf(-10.0 * t) * ((10.0 * t - 0.75) * c4).sin() + 1.0
            }
            Easing::ElasticInOut => {
                let c5 = (2.0 * PI) / 4.5;
                let s = ((20.0 * t - 11.125) * c5).sin();
                if t < 0.5 {
                    -(2.0f32.powf(20.0 * t - 10.0) * s) / 2.0
                } else {
                    (2.0f32.powf(-20.0 * t + 10.0) * s) / 2.0 + 1.0
                }
            }
            Easing::BackIn => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                c3 * t * t * t - c1 * t * t
            }
            Easing::BackOut => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + c1 * u * u
            }
            Easing::BackInOut => {
                let c2 = 1.70158 * 1.525;
                if t < 0.5 {
                    let u = 2.0 * t;
                    (u * u * ((c2 + 1.0) * u - c2)) / 2.0
                } else {
                    let u = 2.0 * t - 2.0;
                    (u * u * ((c2 + 1.0) * u + c2) + 2.0) / 2.0
                }
            }
            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
            Easing::CubicBezier { x1, y1, x2, y2 } => bezier_ease_t(t, x1, y1, x2, y2),
        }
    }
}

impl Ease for Easing {
    #[inline]
    fn progress(&self, t: f32) -> f32 {
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else {
            self.eval(t)
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;
    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let u = t - 1.5 / d1;
        n1 * u * u + 0.75
    } else if t < 2.5 / d1 {
        let u = t - 2.25 / d1;
        n1 * u * u + 0.9375
    } else {
        let u = t - 2.625 / d1;
        n1 * u * u + 0.984375
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 in [0,1]
    let (x1, x2) = (x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0));
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32, eps: f32) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn endpoints_are_exact() {
        for e in Easing::NAMED {
            assert_eq!(e.progress(0.0), 0.0, "{e:?} at 0");
            assert_eq!(e.progress(1.0), 1.0, "{e:?} at 1");
        }
    }

    #[test]
    fn out_of_range_input_is_pinned() {
        assert_eq!(Easing::ElasticOut.progress(-0.3), 0.0);
        assert_eq!(Easing::BackIn.progress(1.7), 1.0);
    }

    #[test]
    fn in_out_curves_are_symmetric_at_midpoint() {
        approx(Easing::QuadInOut.progress(0.5), 0.5, 1e-6);
        approx(Easing::CubicInOut.progress(0.5), 0.5, 1e-6);
        approx(Easing::SineInOut.progress(0.5), 0.5, 1e-6);
        approx(Easing::BounceInOut.progress(0.5), 0.5, 1e-6);
    }

    #[test]
    fn quad_values() {
        approx(Easing::QuadIn.progress(0.5), 0.25, 1e-6);
        approx(Easing::QuadOut.progress(0.5), 0.75, 1e-6);
        approx(Easing::QuadInOut.progress(0.25), 0.125, 1e-6);
    }

    #[test]
    fn overshooting_curves_leave_unit_range() {
        let max_out = (1..100)
            .map(|i| Easing::ElasticOut.progress(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(max_out > 1.0, "elastic out should overshoot, max={max_out}");
        let min_in = (1..100)
            .map(|i| Easing::BackIn.progress(i as f32 / 100.0))
            .fold(f32::MAX, f32::min);
        assert!(min_in < 0.0, "back in should undershoot, min={min_in}");
        assert!(Easing::ElasticInOut.overshoots());
        assert!(!Easing::QuadOut.overshoots());
    }

    #[test]
    fn linear_bezier_is_identity() {
        let e = Easing::CubicBezier {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        };
        approx(e.progress(0.3), 0.3, 1e-6);
    }

    #[test]
    fn closures_are_eases() {
        let square = |t: f32| t * t;
        approx(square.progress(0.5), 0.25, 1e-6);
    }

    #[test]
    fn serde_round_trip_names() {
        let e: Easing = serde_json::from_str("\"elastic_in_out\"").unwrap();
        assert_eq!(e, Easing::ElasticInOut);
        let b: Easing = serde_json::from_str(
            r#"{ "cubic_bezier": { "x1": 0.4, "y1": 0.0, "x2": 0.2, "y2": 1.0 } }"#,
        )
        .unwrap();
        assert!(matches!(b, Easing::CubicBezier { .. }));
    }
}
