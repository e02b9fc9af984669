//! The particle creature: particles, population, interaction targets and the
//! state that ties them together.

pub mod interaction;
pub mod particle;
pub mod smoother;
pub mod state;
pub mod system;

pub use interaction::{Interaction, InteractionController, SleepGlyph};
pub use particle::{Environment, Particle, MAX_LIFESPAN};
pub use smoother::TargetSmoother;
pub use state::SimulationState;
pub use system::ParticleSystem;
