pub mod camera;
pub mod clock;
pub mod color;
pub mod config;
pub mod math;
pub mod projection;
pub mod raster;
pub mod render;
pub mod scenario;
pub mod shade;
pub mod sim;
pub mod view;

pub use camera::Camera;
pub use clock::FrameClock;
pub use color::Rgba;
pub use config::Settings;
pub use math::Vec3;
pub use projection::Projection;
pub use raster::{fill_sphere, PixelBuffer};
pub use render::render_frame;
pub use shade::Shader;
pub use sim::{Body, Gravity, Simulation};
pub use view::View;
