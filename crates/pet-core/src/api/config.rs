use serde::{Deserialize, Serialize};

/// Where the initial population is scattered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeedArea {
    /// Uniformly across the whole canvas.
    Full,
    /// Within `±spread` of the canvas center on each axis.
    Centered { spread: f32 },
}

impl Default for SeedArea {
    fn default() -> Self {
        SeedArea::Full
    }
}

/// Per-particle kinematics and appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTuning {
    /// Velocity magnitude cap (default: 12).
    pub max_speed: f32,
    /// Uniform range for the construction size.
    pub size_range: (f32, f32),
    /// Hue range in degrees.
    pub hue_range: (f32, f32),
    pub saturation_range: (f32, f32),
    pub brightness_range: (f32, f32),
    /// Lifespan lost per frame while far from the target.
    pub decay_range: (f32, f32),
    /// Magnitude of the noise-heading force.
    pub noise_force: f32,
    /// Magnitude of the constant upward drift.
    pub upward_force: f32,
    /// Maximum steering force per frame.
    pub steer_limit: f32,
    /// Downward acceleration re-applied after each integration.
    pub gravity: f32,
    /// Spatial scale of the heading noise.
    pub noise_scale: f32,
    /// Frame scale of the heading noise.
    pub noise_time_scale: f32,
    pub size_noise_scale: f32,
    pub size_noise_time_scale: f32,
    /// Beyond this distance a particle loses lifespan and steers at full speed.
    pub death_radius: f32,
    /// Distance at which size and alpha reach their far values.
    pub fade_radius: f32,
    /// Alpha (0-255) of a particle at or beyond `fade_radius`.
    pub far_alpha: f32,
    /// Desired speed while feeding, regardless of distance.
    pub feeding_speed: f32,
    /// Growth factor of a freshly constructed particle.
    pub initial_growth: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            max_speed: 12.0,
            size_range: (6.0, 14.0),
            hue_range: (15.0, 35.0),
            saturation_range: (90.0, 100.0),
            brightness_range: (95.0, 100.0),
            decay_range: (2.0, 4.0),
            noise_force: 0.5,
            upward_force: 0.5,
            steer_limit: 0.7,
            gravity: 0.08,
            noise_scale: 0.01,
            noise_time_scale: 0.01,
            size_noise_scale: 0.05,
            size_noise_time_scale: 0.02,
            death_radius: 200.0,
            fade_radius: 300.0,
            far_alpha: 50.0,
            feeding_speed: 10.0,
            initial_growth: 1.0,
        }
    }
}

/// Durations and trajectory shapes of the feed / pet / sleep interactions.
/// Times are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionTuning {
    pub feed_duration: f32,
    pub pet_duration: f32,
    pub sleep_duration: f32,
    /// Permanent growth multiplier applied by each feed.
    pub feed_growth: f32,
    /// Horizontal radius of the feeding arc as a fraction of canvas width.
    /// The vertical radius is half of it.
    pub feed_radius_fraction: f32,
    /// Per-frame smoothing of the raw pointer in Idle.
    pub idle_smoothing: f32,
    /// Per-frame easing toward the sleep corner.
    pub sleep_easing: f32,
    /// Sleep corner as fractions of canvas width and height.
    pub sleep_corner: (f32, f32),
    pub sleep_curl_radius: f32,
    /// Milliseconds per curl revolution.
    pub sleep_curl_period: f32,
    pub sleep_pulse_amplitude: f32,
    pub sleep_pulse_period: f32,
    /// Horizontal and vertical petting wiggle amplitudes.
    pub pet_amplitude: (f32, f32),
    /// Horizontal and vertical petting wiggle frequencies (radians per ms).
    pub pet_frequency: (f32, f32),
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            feed_duration: 2000.0,
            pet_duration: 3000.0,
            sleep_duration: 6000.0,
            feed_growth: 1.5,
            feed_radius_fraction: 0.2,
            idle_smoothing: 0.1,
            sleep_easing: 0.02,
            sleep_corner: (0.15, 0.85),
            sleep_curl_radius: 12.0,
            sleep_curl_period: 1500.0,
            sleep_pulse_amplitude: 8.0,
            sleep_pulse_period: 4000.0,
            pet_amplitude: (40.0, 25.0),
            pet_frequency: (0.012, 0.019),
        }
    }
}

/// Configuration for the simulation, provided by the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Canvas width in pixels (default: 800).
    pub width: f32,
    /// Canvas height in pixels (default: 600).
    pub height: f32,
    /// Fixed population size (default: 3000).
    pub particle_count: usize,
    /// Seed for construction randomness and the noise field (default: 42).
    pub seed: u64,
    /// Initial scatter of the population.
    pub seed_area: SeedArea,
    /// Alpha (0-255) of the black wash painted before each frame (default: 8).
    pub trail_alpha: f32,
    pub particle: ParticleTuning,
    pub interaction: InteractionTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            particle_count: 3000,
            seed: 42,
            seed_area: SeedArea::default(),
            trail_alpha: 8.0,
            particle: ParticleTuning::default(),
            interaction: InteractionTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Config with the given canvas size and population, defaults elsewhere.
    pub fn with_canvas(width: f32, height: f32, particle_count: usize) -> Self {
        Self {
            width,
            height,
            particle_count,
            ..Self::default()
        }
    }

    /// Replace values the simulation cannot use with safe ones.
    pub fn sanitized(mut self) -> Self {
        self.width = sanitize_dim("width", self.width);
        self.height = sanitize_dim("height", self.height);
        if !self.trail_alpha.is_finite() || !(0.0..=255.0).contains(&self.trail_alpha) {
            log::warn!("config: trail_alpha {} clamped", self.trail_alpha);
            self.trail_alpha = if self.trail_alpha.is_finite() {
                self.trail_alpha.clamp(0.0, 255.0)
            } else {
                SimConfig::default().trail_alpha
            };
        }
        if let SeedArea::Centered { spread } = self.seed_area {
            if !spread.is_finite() || spread < 0.0 {
                log::warn!("config: seed spread {} replaced with 0", spread);
                self.seed_area = SeedArea::Centered { spread: 0.0 };
            }
        }

        let p = &mut self.particle;
        p.size_range = ordered("size_range", p.size_range);
        p.hue_range = ordered("hue_range", p.hue_range);
        p.saturation_range = ordered("saturation_range", p.saturation_range);
        p.brightness_range = ordered("brightness_range", p.brightness_range);
        p.decay_range = ordered("decay_range", p.decay_range);
        if p.size_range.0 < 0.0 {
            log::warn!("config: negative particle size clamped to 0");
            p.size_range = (0.0, p.size_range.1.max(0.0));
        }

        let i = &mut self.interaction;
        i.feed_duration = sanitize_dim("feed_duration", i.feed_duration);
        i.pet_duration = sanitize_dim("pet_duration", i.pet_duration);
        i.sleep_duration = sanitize_dim("sleep_duration", i.sleep_duration);
        if !i.feed_growth.is_finite() || i.feed_growth < 1.0 {
            log::warn!("config: feed_growth {} raised to 1 (growth never shrinks)", i.feed_growth);
            i.feed_growth = 1.0;
        }
        i.idle_smoothing = unit("idle_smoothing", i.idle_smoothing);
        i.sleep_easing = unit("sleep_easing", i.sleep_easing);
        self
    }
}

fn sanitize_dim(name: &str, value: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("config: {} {} clamped to 0", name, value);
        0.0
    }
}

fn unit(name: &str, value: f32) -> f32 {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        value
    } else {
        log::warn!("config: {} {} clamped to [0, 1]", name, value);
        if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 }
    }
}

fn ordered(name: &str, range: (f32, f32)) -> (f32, f32) {
    if range.0 <= range.1 {
        range
    } else {
        log::warn!("config: {} {:?} swapped", name, range);
        (range.1, range.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_partial_config_keeps_defaults() {
        let json = r#"{
            "width": 1024,
            "particle_count": 2000,
            "seed_area": { "kind": "centered", "spread": 100 },
            "interaction": { "feed_growth": 2.0 }
        }"#;
        let config = SimConfig::from_json(json).unwrap();
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.particle_count, 2000);
        assert_eq!(config.seed_area, SeedArea::Centered { spread: 100.0 });
        assert_eq!(config.interaction.feed_growth, 2.0);
        assert_eq!(config.interaction.feed_duration, 2000.0);
        assert_eq!(config.particle.max_speed, 12.0);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(SimConfig::from_json("{ width: ").is_err());
    }

    #[test]
    fn sanitize_clamps_bad_values() {
        let mut config = SimConfig::with_canvas(-10.0, f32::NAN, 5);
        config.interaction.feed_growth = 0.5;
        config.interaction.idle_smoothing = 3.0;
        config.particle.hue_range = (35.0, 15.0);
        let config = config.sanitized();
        assert_eq!(config.width, 0.0);
        assert_eq!(config.height, 0.0);
        assert_eq!(config.interaction.feed_growth, 1.0);
        assert_eq!(config.interaction.idle_smoothing, 1.0);
        assert_eq!(config.particle.hue_range, (15.0, 35.0));
    }

    #[test]
    fn defaults_match_documented_durations() {
        let tuning = InteractionTuning::default();
        assert_eq!(tuning.feed_duration, 2000.0);
        assert_eq!(tuning.pet_duration, 3000.0);
        assert_eq!(tuning.sleep_duration, 6000.0);
    }
}
