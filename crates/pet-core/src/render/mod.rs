pub mod circle;
pub mod color;

pub use circle::{CircleBuffer, CircleInstance, Surface};
pub use color::Hsba;
