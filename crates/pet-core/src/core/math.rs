// core/math.rs
//
// Interpolation and vector helpers shared by the particle model and the
// interaction targets. Pure functions, no state.

use glam::Vec2;

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Re-map `value` from `[in_min, in_max]` to `[out_min, out_max]`, clamped to
/// the output range. Works for inverted output ranges (out_min > out_max).
/// A degenerate input range maps everything to `out_min`.
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span.abs() <= f32::EPSILON || !value.is_finite() {
        return out_min;
    }
    let t = ((value - in_min) / span).clamp(0.0, 1.0);
    lerp(out_min, out_max, t)
}

/// Clamp the length of `v` to at most `max`.
#[inline]
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    v.clamp_length_max(max.max(0.0))
}

/// Rescale `v` to length `magnitude`. A zero vector stays zero.
#[inline]
pub fn with_magnitude(v: Vec2, magnitude: f32) -> Vec2 {
    v.normalize_or_zero() * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert!((lerp(10.0, 20.0, 0.5) - 15.0).abs() < 0.001);
    }

    #[test]
    fn map_range_clamps_both_ends() {
        assert_eq!(map_range(-50.0, 0.0, 200.0, 0.1, 1.0), 0.1);
        assert_eq!(map_range(500.0, 0.0, 200.0, 0.1, 1.0), 1.0);
        assert!((map_range(100.0, 0.0, 200.0, 0.0, 1.0) - 0.5).abs() < 0.001);
    }

    #[test]
    fn map_range_inverted_output() {
        let far = map_range(300.0, 0.0, 300.0, 255.0, 50.0);
        assert!((far - 50.0).abs() < 0.001);
        let near = map_range(0.0, 0.0, 300.0, 255.0, 50.0);
        assert!((near - 255.0).abs() < 0.001);
    }

    #[test]
    fn map_range_degenerate_input() {
        assert_eq!(map_range(5.0, 1.0, 1.0, 3.0, 9.0), 3.0);
    }

    #[test]
    fn with_magnitude_keeps_zero_vector() {
        assert_eq!(with_magnitude(Vec2::ZERO, 5.0), Vec2::ZERO);
        let v = with_magnitude(Vec2::new(3.0, 4.0), 10.0);
        assert!((v.length() - 10.0).abs() < 0.001);
    }

    #[test]
    fn limit_only_shrinks() {
        let short = limit(Vec2::new(0.1, 0.0), 0.7);
        assert_eq!(short, Vec2::new(0.1, 0.0));
        let long = limit(Vec2::new(10.0, 0.0), 0.7);
        assert!((long.length() - 0.7).abs() < 0.001);
    }
}
