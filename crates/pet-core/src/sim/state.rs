use glam::Vec2;

use crate::api::config::SimConfig;
use crate::api::types::{Canvas, InteractionKind, PetEvent, PetEventKind};
use crate::core::noise::NoiseField;
use crate::core::rng::Rng;
use crate::render::Surface;

use super::interaction::{Interaction, InteractionController, SleepGlyph};
use super::particle::Environment;
use super::system::ParticleSystem;

/// Everything the frame driver owns: population, controller, randomness
/// and clock. All entry points of the simulation go through here.
#[derive(Debug, Clone)]
pub struct SimulationState {
    config: SimConfig,
    canvas: Canvas,
    particles: ParticleSystem,
    controller: InteractionController,
    noise: NoiseField,
    rng: Rng,
    frame_count: u64,
    last_now: f64,
    target: Vec2,
    events: Vec<PetEvent>,
}

impl SimulationState {
    /// Build the population and an idle controller from `config`.
    pub fn setup(config: SimConfig) -> Self {
        let config = config.sanitized();
        let canvas = Canvas::new(config.width, config.height);
        let mut rng = Rng::new(config.seed);
        let particles = ParticleSystem::setup(
            config.particle_count,
            config.seed_area,
            canvas,
            &config.particle,
            &mut rng,
        );
        let controller = InteractionController::new(config.interaction.clone(), canvas);
        log::info!(
            "simulation: {} particles on {}x{} canvas",
            particles.len(),
            canvas.width,
            canvas.height
        );
        Self {
            noise: NoiseField::new(config.seed as u32),
            target: canvas.center(),
            config,
            canvas,
            particles,
            controller,
            rng,
            frame_count: 0,
            last_now: 0.0,
            events: Vec::with_capacity(8),
        }
    }

    /// Defaults everywhere except canvas size and population.
    pub fn new(width: f32, height: f32, particle_count: usize) -> Self {
        Self::setup(SimConfig::with_canvas(width, height, particle_count))
    }

    /// Run one frame: expire interactions, compute the target, then steer,
    /// integrate and draw every particle into `surface`.
    ///
    /// `pointer` is the mouse/touch position, `None` when there is none.
    /// `now` is a millisecond timestamp; it never runs backwards.
    pub fn advance_frame<S: Surface + ?Sized>(
        &mut self,
        pointer: Option<Vec2>,
        now: f64,
        surface: &mut S,
    ) {
        self.events.clear();
        let now = self.clamp_now(now);
        self.last_now = now;
        if self.frame_count == 0 {
            // Triggers pressed before the first frame had no clock to read.
            self.controller.restamp(now);
        }
        self.frame_count += 1;

        if let Some(ended) = self.controller.expire(now) {
            if ended == InteractionKind::Feed {
                self.particles.end_feeding();
            }
            self.events
                .push(PetEvent::interaction(PetEventKind::InteractionEnded, ended, self.frame_count));
        }

        self.target = self.controller.target(now, self.canvas, pointer);

        let env = Environment::new(&self.noise, self.frame_count, &self.config.particle);
        let respawned = self
            .particles
            .advance_frame(self.target, &env, &mut self.rng, surface);
        if respawned > 0 {
            log::trace!("frame {}: respawned {} particles", self.frame_count, respawned);
        }
    }

    /// Update canvas-relative values. Particles are left where they are.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas = Canvas::new(width, height);
        self.config.width = self.canvas.width;
        self.config.height = self.canvas.height;
        log::debug!("simulation: resized to {}x{}", self.canvas.width, self.canvas.height);
    }

    pub fn trigger_feed(&mut self) -> bool {
        self.trigger(InteractionKind::Feed)
    }

    pub fn trigger_pet(&mut self) -> bool {
        self.trigger(InteractionKind::Pet)
    }

    pub fn trigger_sleep(&mut self) -> bool {
        self.trigger(InteractionKind::Sleep)
    }

    /// Start `kind`, stamped with the last frame's timestamp. Takes effect
    /// on the next frame. Returns false if another interaction is active.
    ///
    /// Before the first frame there is no timestamp yet; the start is
    /// restamped with the first frame's `now`.
    pub fn trigger(&mut self, kind: InteractionKind) -> bool {
        self.trigger_at(kind, self.last_now)
    }

    /// Start `kind` at timestamp `now` (ms), for hosts that know when the
    /// button was pressed. `now` is clamped like `advance_frame`'s.
    pub fn trigger_at(&mut self, kind: InteractionKind, now: f64) -> bool {
        let now = self.clamp_now(now);
        let accepted = self.controller.try_start(kind, now, self.canvas);
        let event_kind = if accepted {
            if kind == InteractionKind::Feed {
                self.particles.begin_feeding(self.config.interaction.feed_growth);
            }
            PetEventKind::InteractionStarted
        } else {
            PetEventKind::InteractionRejected
        };
        self.events
            .push(PetEvent::interaction(event_kind, kind, self.frame_count));
        accepted
    }

    fn clamp_now(&self, now: f64) -> f64 {
        if now.is_finite() {
            now.max(self.last_now)
        } else {
            self.last_now
        }
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Target the particles steered toward in the last frame.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn interaction(&self) -> Interaction {
        self.controller.state()
    }

    pub fn active_interaction(&self) -> Option<InteractionKind> {
        self.controller.active()
    }

    pub fn sleep_glyphs(&self) -> Vec<SleepGlyph> {
        self.controller.sleep_glyphs(self.last_now)
    }

    /// Events raised since the start of the last frame.
    pub fn events(&self) -> &[PetEvent] {
        &self.events
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_now(&self) -> f64 {
        self.last_now
    }
}
