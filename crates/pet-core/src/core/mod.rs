pub mod math;
pub mod noise;
pub mod rng;
