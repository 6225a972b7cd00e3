//! Everything a frame needs to turn world positions into shaded pixels.

use crate::camera::Camera;
use crate::math::Vec3;
use crate::projection::Projection;
use crate::shade::Shader;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub camera: Camera,
    /// Light position in view units.
    pub light: Vec3,
    /// Metres to view units. Applied to positions and radii alike.
    pub scale: f64,
    /// Extra multiplier on body radii so they stay visible next to orbital distances.
    pub radius_scale: f64,
    pub projection: Projection,
    pub shader: Shader,
}

impl View {
    pub fn world_to_camera(&self, world: Vec3) -> Vec3 {
        self.camera.to_camera_space(world * self.scale)
    }

    pub fn project_to_screen(&self, cam: Vec3) -> Vec3 {
        self.projection.to_screen(cam)
    }

    /// On-screen radius in pixels of a sphere at camera-space `depth`.
    pub fn screen_radius(&self, world_radius: f64, depth: f64) -> f64 {
        world_radius * self.scale * self.radius_scale * self.projection.perspective_factor(depth)
    }

    /// Direction from a body's center toward the light, in world orientation.
    pub fn light_direction(&self, world: Vec3) -> Vec3 {
        self.light - world * self.scale
    }
}
