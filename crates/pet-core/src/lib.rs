pub mod api;
pub mod core;
pub mod input;
pub mod render;
pub mod sim;

// Re-export key types at crate root for convenience
pub use crate::api::config::{InteractionTuning, ParticleTuning, SeedArea, SimConfig};
pub use crate::api::types::{Canvas, InteractionKind, PetEvent, PetEventKind};
pub use crate::core::math::{lerp, lerp_vec2, limit, map_range, with_magnitude};
pub use crate::core::noise::NoiseField;
pub use crate::core::rng::Rng;
pub use crate::input::queue::{InputEvent, InputQueue, PointerTracker};
pub use crate::render::{CircleBuffer, CircleInstance, Hsba, Surface};
pub use crate::sim::{
    Environment, Interaction, InteractionController, Particle, ParticleSystem,
    SimulationState, SleepGlyph, TargetSmoother, MAX_LIFESPAN,
};
