//! Component-wise interpolation helpers.

/// Linear interpolation of scalars. `t` may leave [0, 1] for overshooting eases.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate two equally sized vectors into `out` (cleared first).
#[inline]
pub fn lerp_components(start: &[f32], end: &[f32], t: f32, out: &mut Vec<f32>) {
    out.clear();
    out.extend(start.iter().zip(end).map(|(a, b)| lerp_f32(*a, *b, t)));
}
