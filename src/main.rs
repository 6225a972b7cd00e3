mod app;
mod input;
mod term;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use orbitview::config::{load_settings, project_paths, Settings};
use orbitview::scenario::{earth_moon, load_scenario};
use orbitview::Simulation;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "orbitview")]
#[command(about = "Gravitating bodies rendered as shaded spheres in the terminal", long_about = None)]
struct Args {
    /// JSON scenario with the initial bodies (default: Earth and Moon)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Settings file (default: settings.json in the user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// FPS cap
    #[arg(long)]
    fps: Option<u32>,

    /// Simulated seconds per real second
    #[arg(long)]
    time_scale: Option<f64>,

    /// Body radius exaggeration
    #[arg(long)]
    radius_scale: Option<f64>,

    /// Draw a marker at each body's projected center
    #[arg(long, default_value_t = false)]
    markers: bool,

    /// Start paused
    #[arg(long, default_value_t = false)]
    paused: bool,

    /// Log file (default: orbitview.log in the user data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn apply(&self, s: &mut Settings) {
        if let Some(fps) = self.fps {
            s.fps_cap = fps;
        }
        if let Some(t) = self.time_scale {
            s.time_scale = t;
        }
        if let Some(r) = self.radius_scale {
            s.radius_scale = r;
        }
        if self.markers {
            s.show_markers = true;
        }
    }
}

// stdout/stderr belong to the UI, so logs go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = project_paths()?;

    init_logging(args.log_file.as_deref().unwrap_or(paths.log_path.as_path()))?;

    let settings_path = args.config.as_deref().unwrap_or(paths.settings_path.as_path());
    let mut settings = load_settings(settings_path, args.config.is_some());
    args.apply(&mut settings);
    info!("settings from {}: {:?}", settings_path.display(), settings);

    let bodies = match &args.scenario {
        Some(path) => load_scenario(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => earth_moon(),
    };
    info!(
        "{} bodies from {}",
        bodies.len(),
        args.scenario
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in Earth-Moon".to_string())
    );

    let sim = Simulation::new(bodies, settings.gravity());
    let mut app = app::App::new(settings, sim, args.paused)?;
    app.run()
}
