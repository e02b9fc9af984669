use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::color::Hsba;

/// Drawing target handed to particles each frame.
///
/// The simulation only ever emits filled, stroke-less circles.
pub trait Surface {
    fn fill_circle(&mut self, center: Vec2, diameter: f32, color: Hsba);
}

/// Per-instance circle data read by the page's canvas renderer.
/// 8 floats = 32 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    pub x: f32,
    pub y: f32,
    pub diameter: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity in [0, 1].
    pub a: f32,
    /// Source hue in degrees, for renderers that prefer HSL fills.
    pub hue: f32,
}

impl CircleInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of circles produced by one frame.
pub struct CircleBuffer {
    instances: Vec<CircleInstance>,
}

impl CircleBuffer {
    pub fn new() -> Self {
        Self::with_capacity(3000)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: CircleInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[CircleInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Flat float view, `FLOATS` per circle.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for CircleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for CircleBuffer {
    fn fill_circle(&mut self, center: Vec2, diameter: f32, color: Hsba) {
        let [r, g, b] = color.to_rgb();
        self.push(CircleInstance {
            x: center.x,
            y: center.y,
            diameter: diameter.max(0.0),
            r,
            g,
            b,
            a: color.alpha.clamp(0.0, 1.0),
            hue: color.hue,
        });
    }
}
