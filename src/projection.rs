use crate::math::Vec3;

/// Fixed-focal-length perspective onto a `width` x `height` pixel grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub focal: f64,
    /// Points with camera-space depth below this are culled.
    pub near: f64,
    pub width: f64,
    pub height: f64,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            focal: 500.0,
            near: 1.0,
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn perspective_factor(&self, depth: f64) -> f64 {
        self.focal / (self.focal + depth)
    }

    pub fn is_visible(&self, cam: Vec3) -> bool {
        cam.z >= self.near
    }

    /// Screen x/y in pixels (y grows downward); z carries camera depth through.
    pub fn to_screen(&self, cam: Vec3) -> Vec3 {
        let f = self.perspective_factor(cam.z);
        Vec3::new(
            self.width / 2.0 + cam.x * f,
            self.height / 2.0 - cam.y * f,
            cam.z,
        )
    }
}
