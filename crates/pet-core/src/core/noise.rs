//! Coherent 3D noise field driving particle headings and size wobble.

use noise::{NoiseFn, Perlin};

/// Seedable gradient-noise field returning values in [0, 1].
///
/// Continuous in all three axes: nearby `(x, y, t)` inputs give nearby
/// outputs, which keeps the particle headings from jittering.
#[derive(Clone)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample the field. Non-finite inputs sample the origin.
    pub fn sample(&self, x: f32, y: f32, t: f32) -> f32 {
        let point = [x, y, t].map(|c| if c.is_finite() { c as f64 } else { 0.0 });
        let raw = self.perlin.get(point);
        ((raw * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").finish_non_exhaustive()
    }
}
