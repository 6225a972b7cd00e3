use crate::math::Vec3;

/// Viewpoint in view units (world metres × scale). Angles are radians and
/// accumulate without wrapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub pitch: f64,
    pub yaw: f64,
}

impl Camera {
    pub fn new(position: Vec3, pitch: f64, yaw: f64) -> Self {
        Self {
            position,
            pitch,
            yaw,
        }
    }

    pub fn rotate(&mut self, d_yaw: f64, d_pitch: f64) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
    }

    pub fn dolly(&mut self, dz: f64) {
        self.position.z += dz;
    }

    /// Translate into the camera's frame, then rotate by pitch and then yaw.
    pub fn to_camera_space(&self, p: Vec3) -> Vec3 {
        let rel = p - self.position;
        let rel = rotate_x(rel, self.pitch);
        rotate_y(rel, self.yaw)
    }
}

/// Rotation in the Y/Z plane.
pub fn rotate_x(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

/// Rotation in the X/Z plane.
pub fn rotate_y(v: Vec3, angle: f64) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z)
}
