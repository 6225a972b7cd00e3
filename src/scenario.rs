//! Initial conditions: the built-in Earth–Moon pair, or bodies read from JSON.
//!
//! ```json
//! {
//!   "bodies": [
//!     { "name": "Earth", "position": [0, 0, 0], "velocity": [0, 0, 0],
//!       "radius": 6371000, "mass": 5.972e24, "color": "#FFFFFFFF" },
//!     { "name": "Moon", "position": [384400000, 0, 0], "velocity": [0, 1022, 0],
//!       "radius": 1737000, "mass": 7.348e22, "color": "#FFCCCCFF" }
//!   ]
//! }
//! ```

use crate::color::Rgba;
use crate::math::Vec3;
use crate::sim::Body;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const EARTH_MASS: f64 = 5.972e24;
pub const MOON_MASS: f64 = 7.348e22;
pub const EARTH_RADIUS: f64 = 6_371_000.0;
pub const MOON_RADIUS: f64 = 1_737_000.0;
pub const EARTH_MOON_DISTANCE: f64 = 384_400_000.0;
pub const MOON_SPEED: f64 = 1022.0;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("reading scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scenario has no bodies")]
    Empty,
    #[error("body {index} ({name}): {reason}")]
    InvalidBody {
        index: usize,
        name: String,
        reason: &'static str,
    },
}

#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: String,
    pub position: [f64; 3], // m
    #[serde(default)]
    pub velocity: [f64; 3], // m/s
    pub radius: f64,        // m
    pub mass: f64,          // kg
    #[serde(default = "default_color")]
    pub color: Rgba,
}

fn default_color() -> Rgba {
    Rgba::WHITE
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn into_bodies(self) -> Result<Vec<Body>, ScenarioError> {
        if self.bodies.is_empty() {
            return Err(ScenarioError::Empty);
        }
        self.bodies
            .into_iter()
            .enumerate()
            .map(|(index, b)| {
                let invalid = |reason| ScenarioError::InvalidBody {
                    index,
                    name: b.name.clone(),
                    reason,
                };
                let position = Vec3::from(b.position);
                let velocity = Vec3::from(b.velocity);
                if !position.is_finite() || !velocity.is_finite() {
                    return Err(invalid("position and velocity must be finite"));
                }
                if !(b.mass.is_finite() && b.mass > 0.0) {
                    return Err(invalid("mass must be positive"));
                }
                if !(b.radius.is_finite() && b.radius > 0.0) {
                    return Err(invalid("radius must be positive"));
                }
                let name = if b.name.is_empty() {
                    format!("body {index}")
                } else {
                    b.name
                };
                Ok(Body {
                    name,
                    position,
                    velocity,
                    radius: b.radius,
                    mass: b.mass,
                    color: b.color,
                })
            })
            .collect()
    }
}

pub fn parse_scenario(json: &str) -> Result<Vec<Body>, ScenarioError> {
    let cfg: ScenarioConfig = serde_json::from_str(json)?;
    cfg.into_bodies()
}

pub fn load_scenario(path: &Path) -> Result<Vec<Body>, ScenarioError> {
    let s = std::fs::read_to_string(path)?;
    parse_scenario(&s)
}

pub fn earth_moon() -> Vec<Body> {
    vec![
        Body {
            name: "Earth".to_string(),
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            radius: EARTH_RADIUS,
            mass: EARTH_MASS,
            color: Rgba::from_packed(0xFFFFFFFF),
        },
        Body {
            name: "Moon".to_string(),
            position: Vec3::new(EARTH_MOON_DISTANCE, 0.0, 0.0),
            velocity: Vec3::new(0.0, MOON_SPEED, 0.0),
            radius: MOON_RADIUS,
            mass: MOON_MASS,
            color: Rgba::from_packed(0xFFCCCCFF),
        },
    ]
}
