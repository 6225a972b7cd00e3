//! Lambertian shading with an ambient floor.

use crate::color::Rgba;
use crate::math::Vec3;

pub const DEFAULT_AMBIENT: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shader {
    /// Brightness fraction kept on fully unlit surfaces.
    pub ambient: f64,
}

impl Default for Shader {
    fn default() -> Self {
        Self {
            ambient: DEFAULT_AMBIENT,
        }
    }
}

impl Shader {
    pub fn intensity(normal: Vec3, to_light: Vec3) -> f64 {
        normal.normalized().dot(to_light.normalized()).max(0.0)
    }

    pub fn brightness(&self, normal: Vec3, to_light: Vec3) -> f64 {
        self.ambient + (1.0 - self.ambient) * Self::intensity(normal, to_light)
    }

    /// Scale r/g/b of `base` by the lit brightness; alpha passes through.
    pub fn shade(&self, base: Rgba, normal: Vec3, to_light: Vec3) -> Rgba {
        let k = self.brightness(normal, to_light);
        let ch = |c: u8| (c as f64 * k) as u8;
        Rgba {
            r: ch(base.r),
            g: ch(base.g),
            b: ch(base.b),
            a: base.a,
        }
    }
}
