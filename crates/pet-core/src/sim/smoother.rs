use glam::Vec2;

use crate::core::math::lerp_vec2;

/// Exponential smoothing of the raw pointer position.
///
/// Each `step` closes `factor` of the remaining gap, so with a fixed pointer
/// the distance shrinks by `1 - factor` per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSmoother {
    current: Vec2,
    raw: Vec2,
    factor: f32,
}

impl TargetSmoother {
    pub fn new(start: Vec2, factor: f32) -> Self {
        Self {
            current: start,
            raw: start,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    /// Record the latest pointer. `None` keeps the last known position.
    pub fn observe(&mut self, pointer: Option<Vec2>) {
        if let Some(p) = pointer.filter(|p| p.is_finite()) {
            self.raw = p;
        }
    }

    /// Advance one frame toward the raw pointer and return the smoothed value.
    pub fn step(&mut self) -> Vec2 {
        self.current = lerp_vec2(self.current, self.raw, self.factor);
        self.current
    }

    /// Snap both smoothed and raw positions to `position`.
    pub fn reset(&mut self, position: Vec2) {
        self.current = position;
        self.raw = position;
    }

    /// Move only the smoothed value, e.g. to glide back from an interaction.
    pub fn reseed(&mut self, position: Vec2) {
        self.current = position;
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn raw(&self) -> Vec2 {
        self.raw
    }
}
