//! HSB colors as used by the particles, with conversion to RGB for the page.

/// Hue in degrees [0, 360), saturation and brightness in [0, 100], alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsba {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub alpha: f32,
}

impl Hsba {
    pub fn new(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Self {
        Self { hue, saturation, brightness, alpha }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Convert to sRGB components in [0, 1].
    pub fn to_rgb(&self) -> [f32; 3] {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let v = (self.brightness / 100.0).clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        [r + m, g + m, b + m]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 0.01)
    }

    #[test]
    fn primary_hues() {
        assert!(close(Hsba::new(0.0, 100.0, 100.0, 1.0).to_rgb(), [1.0, 0.0, 0.0]));
        assert!(close(Hsba::new(120.0, 100.0, 100.0, 1.0).to_rgb(), [0.0, 1.0, 0.0]));
        assert!(close(Hsba::new(240.0, 100.0, 100.0, 1.0).to_rgb(), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert!(close(Hsba::new(25.0, 0.0, 50.0, 1.0).to_rgb(), [0.5, 0.5, 0.5]));
    }

    #[test]
    fn warm_orange() {
        let [r, g, b] = Hsba::new(30.0, 100.0, 100.0, 1.0).to_rgb();
        assert!((r - 1.0).abs() < 0.01);
        assert!((g - 0.5).abs() < 0.01);
        assert!(b.abs() < 0.01);
    }

    #[test]
    fn negative_hue_wraps() {
        assert!(close(
            Hsba::new(-360.0, 100.0, 100.0, 1.0).to_rgb(),
            Hsba::new(0.0, 100.0, 100.0, 1.0).to_rgb()
        ));
    }
}
