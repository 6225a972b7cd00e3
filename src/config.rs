use crate::camera::Camera;
use crate::math::Vec3;
use crate::projection::Projection;
use crate::scenario::EARTH_MOON_DISTANCE;
use crate::shade::Shader;
use crate::sim::{Gravity, G};
use crate::view::View;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps_cap: u32,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
    pub radius_scale: f64,
    pub focal_length: f64,
    pub near_plane: f64,
    pub ambient: f64,
    pub min_distance: f64,
    pub gravity: f64,
    pub time_scale: f64,
    pub drag_sensitivity: f64,
    pub zoom_step: f64, // m per wheel notch
    pub camera_distance: f64, // m
    pub camera_pitch: f64,
    pub light_distance: f64, // m
    pub show_markers: bool,
    pub star_count: usize,
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 60,
            width: 900,
            height: 600,
            scale: 1e-5,
            radius_scale: 10.0,
            focal_length: 500.0,
            near_plane: 1.0,
            ambient: 0.1,
            min_distance: 1.0,
            gravity: G,
            time_scale: 1.0,
            drag_sensitivity: 0.005,
            zoom_step: 2_000_000.0,
            camera_distance: EARTH_MOON_DISTANCE * 2.5,
            camera_pitch: 0.3,
            light_distance: EARTH_MOON_DISTANCE * 3.0,
            show_markers: false,
            star_count: 160,
            seed: 0xC0FFEE_u64,
        }
    }
}

impl Settings {
    pub fn gravity(&self) -> Gravity {
        Gravity {
            g: self.gravity,
            min_distance: self.min_distance,
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(
            Vec3::new(0.0, 0.0, -self.camera_distance * self.scale),
            self.camera_pitch,
            0.0,
        )
    }

    pub fn view(&self) -> View {
        View {
            camera: self.camera(),
            light: Vec3::new(0.0, 0.0, -self.light_distance * self.scale),
            scale: self.scale,
            radius_scale: self.radius_scale,
            projection: Projection {
                focal: self.focal_length,
                near: self.near_plane,
                ..Projection::new(self.width, self.height)
            },
            shader: Shader {
                ambient: self.ambient,
            },
        }
    }

    /// View units the camera moves per wheel notch.
    pub fn zoom_units(&self) -> f64 {
        self.zoom_step * self.scale
    }
}

pub struct Paths {
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "orbitview", "Orbitview")
        .context("could not resolve project directories")?;
    let data = proj.data_local_dir().to_path_buf();
    ensure_dir(&data)?;
    Ok(Paths {
        settings_path: proj.config_dir().join("settings.json"),
        log_path: data.join("orbitview.log"),
    })
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))
}

/// `Ok(None)` when there is no file at `path`.
pub fn read_settings(path: &Path) -> Result<Option<Settings>> {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let settings = serde_json::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(settings))
}

/// Falls back to defaults on any problem. A missing file is only worth a
/// warning when the user named it.
pub fn load_settings(path: &Path, explicit: bool) -> Settings {
    match read_settings(path) {
        Ok(Some(s)) => s,
        Ok(None) => {
            if explicit {
                warn!("settings file {} not found, using defaults", path.display());
            }
            Settings::default()
        }
        Err(e) => {
            warn!("ignoring settings: {e:#}");
            Settings::default()
        }
    }
}
