//! A single steering particle: noise-driven wandering, target seeking,
//! distance-dependent size and fade, and a lifespan that drains while the
//! particle strays too far from the target.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::api::config::ParticleTuning;
use crate::core::math::{lerp, limit, map_range, with_magnitude};
use crate::core::noise::NoiseField;
use crate::core::rng::Rng;
use crate::render::{Hsba, Surface};

/// Full lifespan; restored every frame a particle is close to the target.
pub const MAX_LIFESPAN: f32 = 255.0;

/// Slowest fraction of `max_speed` used when sitting on the target.
const MIN_SPEED_FRACTION: f32 = 0.1;

/// Hue band the feeding glow flickers through.
const FEEDING_HUE: (f32, f32) = (0.0, 50.0);
const FEEDING_HUE_SCALE: f32 = 0.02;
const FEEDING_HUE_TIME_SCALE: f32 = 0.05;

/// Read-only per-frame context shared by every particle.
#[derive(Debug, Clone, Copy)]
pub struct Environment<'a> {
    pub noise: &'a NoiseField,
    /// Frames advanced so far; the time axis of the noise field.
    pub frame: u64,
    pub tuning: &'a ParticleTuning,
}

impl<'a> Environment<'a> {
    pub fn new(noise: &'a NoiseField, frame: u64, tuning: &'a ParticleTuning) -> Self {
        Self { noise, frame, tuning }
    }

    fn frame_f32(&self) -> f32 {
        self.frame as f32
    }
}

/// A single particle with steering, lifecycle and rendering state.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_speed: f32,
    /// Size rolled at construction. Never changes.
    pub original_size: f32,
    /// Rendered diameter, recomputed by `update`.
    pub size: f32,
    /// Construction color (alpha unused).
    pub color: Hsba,
    /// Hue used by `draw`; differs from `color.hue` only while feeding.
    pub display_hue: f32,
    pub distance_from_target: f32,
    pub lifespan: f32,
    pub decay: f32,
    pub feeding: bool,
    growth_factor: f32,
}

impl Particle {
    /// Construct a fresh particle at rest at `position`.
    pub fn new(position: Vec2, tuning: &ParticleTuning, rng: &mut Rng) -> Self {
        let original_size = rng.range(tuning.size_range.0, tuning.size_range.1);
        let hue = rng.range(tuning.hue_range.0, tuning.hue_range.1);
        let saturation = rng.range(tuning.saturation_range.0, tuning.saturation_range.1);
        let brightness = rng.range(tuning.brightness_range.0, tuning.brightness_range.1);
        let decay = rng.range(tuning.decay_range.0, tuning.decay_range.1);
        Particle {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed: tuning.max_speed,
            original_size,
            size: original_size,
            color: Hsba::new(hue, saturation, brightness, 1.0),
            display_hue: hue,
            distance_from_target: 0.0,
            lifespan: MAX_LIFESPAN,
            decay,
            feeding: false,
            growth_factor: tuning.initial_growth.max(0.0),
        }
    }

    pub fn growth_factor(&self) -> f32 {
        self.growth_factor
    }

    /// Multiply the growth factor. Factors below 1 are ignored so growth
    /// never shrinks over the particle's life.
    pub fn grow(&mut self, factor: f32) {
        if factor.is_finite() && factor >= 1.0 {
            self.growth_factor *= factor;
        }
    }

    /// Accumulate this frame's steering, wander and drift forces.
    pub fn follow(&mut self, target: Vec2, env: &Environment) {
        let tuning = env.tuning;
        let desired = target - self.position;
        self.distance_from_target = desired.length();

        let heading = env.noise.sample(
            self.position.x * tuning.noise_scale,
            self.position.y * tuning.noise_scale,
            env.frame_f32() * tuning.noise_time_scale,
        ) * TAU;
        let noise_force = Vec2::from_angle(heading) * tuning.noise_force;
        let upward_force = Vec2::new(0.0, -tuning.upward_force);

        let speed = if self.feeding {
            tuning.feeding_speed
        } else {
            let fraction = map_range(
                self.distance_from_target,
                0.0,
                tuning.death_radius,
                MIN_SPEED_FRACTION,
                1.0,
            );
            self.max_speed * fraction
        };
        let desired = with_magnitude(desired, speed);

        let steer = limit(desired - self.velocity, tuning.steer_limit);
        self.acceleration += steer + noise_force + upward_force;
    }

    /// Integrate motion, then refresh size, hue and lifespan.
    pub fn update(&mut self, env: &Environment) {
        let tuning = env.tuning;
        self.velocity = limit(self.velocity + self.acceleration, self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::new(0.0, tuning.gravity);

        let wobble = env.noise.sample(
            self.position.x * tuning.size_noise_scale,
            self.position.y * tuning.size_noise_scale,
            env.frame_f32() * tuning.size_noise_time_scale,
        );
        let base = self.original_size * self.growth_factor;
        let near = base * (0.8 + wobble * 0.4);
        let far = base * 0.2;
        self.size = map_range(self.distance_from_target, 0.0, tuning.fade_radius, near, far).max(0.0);

        self.display_hue = if self.feeding {
            let flicker = env.noise.sample(
                self.position.x * FEEDING_HUE_SCALE,
                self.position.y * FEEDING_HUE_SCALE,
                env.frame_f32() * FEEDING_HUE_TIME_SCALE,
            );
            lerp(FEEDING_HUE.0, FEEDING_HUE.1, flicker)
        } else {
            self.color.hue
        };

        if self.distance_from_target > tuning.death_radius {
            self.lifespan -= self.decay;
        } else {
            self.lifespan = MAX_LIFESPAN;
        }
    }

    /// Emit this particle as a filled circle. Does not touch simulation state.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, tuning: &ParticleTuning) {
        let move_alpha = map_range(
            self.distance_from_target,
            0.0,
            tuning.fade_radius,
            MAX_LIFESPAN,
            tuning.far_alpha,
        );
        let alpha = move_alpha.min(self.lifespan).max(0.0) / MAX_LIFESPAN;
        let color = Hsba {
            hue: self.display_hue,
            ..self.color
        }
        .with_alpha(alpha);
        surface.fill_circle(self.position, self.size, color);
    }

    pub fn is_dead(&self) -> bool {
        self.lifespan < 0.0
    }
}
