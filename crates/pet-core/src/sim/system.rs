use glam::Vec2;

use crate::api::config::{ParticleTuning, SeedArea};
use crate::api::types::Canvas;
use crate::core::rng::Rng;
use crate::render::Surface;

use super::particle::{Environment, Particle};

/// Fixed-size population of particles.
///
/// The population never grows or shrinks after `setup`: a dead particle is
/// replaced in place by a fresh one at the current target.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    /// Build `count` particles scattered over `area`.
    pub fn setup(
        count: usize,
        area: SeedArea,
        canvas: Canvas,
        tuning: &ParticleTuning,
        rng: &mut Rng,
    ) -> Self {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let position = match area {
                SeedArea::Full => Vec2::new(
                    rng.range(0.0, canvas.width),
                    rng.range(0.0, canvas.height),
                ),
                SeedArea::Centered { spread } => {
                    canvas.center()
                        + Vec2::new(rng.range(-spread, spread), rng.range(-spread, spread))
                }
            };
            particles.push(Particle::new(position, tuning, rng));
        }
        Self { particles }
    }

    /// Steer, integrate and draw every particle, then replace the dead ones.
    /// Returns how many particles were respawned.
    pub fn advance_frame<S: Surface + ?Sized>(
        &mut self,
        target: Vec2,
        env: &Environment,
        rng: &mut Rng,
        surface: &mut S,
    ) -> usize {
        for particle in &mut self.particles {
            particle.follow(target, env);
            particle.update(env);
            particle.draw(surface, env.tuning);
        }

        let mut respawned = 0;
        for particle in &mut self.particles {
            if particle.is_dead() {
                *particle = Particle::new(target, env.tuning, rng);
                respawned += 1;
            }
        }
        respawned
    }

    /// Permanently multiply every particle's growth and switch on feeding.
    pub fn begin_feeding(&mut self, growth: f32) {
        for particle in &mut self.particles {
            particle.grow(growth);
            particle.feeding = true;
        }
    }

    /// Clear feeding flags. Growth is kept.
    pub fn end_feeding(&mut self) {
        for particle in &mut self.particles {
            particle.feeding = false;
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::noise::NoiseField;
    use crate::render::CircleBuffer;

    fn system(count: usize, area: SeedArea) -> (ParticleSystem, Rng) {
        let mut rng = Rng::new(42);
        let system = ParticleSystem::setup(
            count,
            area,
            Canvas::new(800.0, 600.0),
            &ParticleTuning::default(),
            &mut rng,
        );
        (system, rng)
    }

    #[test]
    fn setup_full_area_stays_on_canvas() {
        let (system, _) = system(500, SeedArea::Full);
        assert_eq!(system.len(), 500);
        for p in system.iter() {
            assert!((0.0..=800.0).contains(&p.position.x));
            assert!((0.0..=600.0).contains(&p.position.y));
        }
    }

    #[test]
    fn setup_centered_area_within_spread() {
        let (system, _) = system(500, SeedArea::Centered { spread: 100.0 });
        for p in system.iter() {
            assert!((p.position.x - 400.0).abs() <= 100.0);
            assert!((p.position.y - 300.0).abs() <= 100.0);
        }
    }

    #[test]
    fn setup_zero_count_is_empty() {
        let (system, _) = system(0, SeedArea::Full);
        assert!(system.is_empty());
    }

    #[test]
    fn advance_draws_every_particle() {
        let (mut system, mut rng) = system(50, SeedArea::Full);
        let noise = NoiseField::new(1);
        let tuning = ParticleTuning::default();
        let env = Environment::new(&noise, 1, &tuning);
        let mut buf = CircleBuffer::new();
        system.advance_frame(Vec2::new(400.0, 300.0), &env, &mut rng, &mut buf);
        assert_eq!(buf.instance_count(), 50);
    }

    #[test]
    fn dead_particles_respawn_in_place_at_target() {
        let (mut system, mut rng) = system(10, SeedArea::Full);
        system.begin_feeding(2.0);
        // Far from the target and one decay step from death.
        system.particles_mut()[3].position = Vec2::new(-5000.0, 0.0);
        system.particles_mut()[3].lifespan = 0.5;

        let noise = NoiseField::new(1);
        let tuning = ParticleTuning::default();
        let env = Environment::new(&noise, 1, &tuning);
        let target = Vec2::new(400.0, 300.0);
        let mut buf = CircleBuffer::new();
        let respawned = system.advance_frame(target, &env, &mut rng, &mut buf);

        assert_eq!(respawned, 1);
        assert_eq!(system.len(), 10);
        let fresh = &system.particles()[3];
        assert_eq!(fresh.position, target);
        assert_eq!(fresh.growth_factor(), 1.0);
        assert!(!fresh.feeding);
        assert!((system.particles()[0].growth_factor() - 2.0).abs() < 0.001);
    }

    #[test]
    fn feeding_flags_toggle_and_growth_persists() {
        let (mut system, _) = system(20, SeedArea::Full);
        system.begin_feeding(1.5);
        assert!(system.iter().all(|p| p.feeding));
        system.end_feeding();
        assert!(system.iter().all(|p| !p.feeding));
        assert!(system.iter().all(|p| (p.growth_factor() - 1.5).abs() < 0.001));
    }
}
