use crate::input::{collect_commands, Command, DragTracker};
use crate::term::{draw_text, pixels_to_cells, Letterbox, Terminal};
use crossterm::style::Color;
use log::{debug, info};
use orbitview::render::{build_stars, Star};
use orbitview::{render_frame, FrameClock, PixelBuffer, Settings, Simulation, View};
use std::time::{Duration, Instant};

const HUD_ROWS: u16 = 2;
const MIN_WARP: f64 = 1.0 / 64.0;
const MAX_WARP: f64 = 1.0e6;

/// Simulation, view and playback state driven by commands. Knows nothing of the terminal.
pub(crate) struct Session {
    pub(crate) settings: Settings,
    pub(crate) sim: Simulation,
    pub(crate) view: View,
    pub(crate) paused: bool,
    pub(crate) markers: bool,
    pub(crate) warp: f64,
}

impl Session {
    pub(crate) fn new(settings: Settings, sim: Simulation, paused: bool) -> Self {
        Self {
            view: settings.view(),
            markers: settings.show_markers,
            warp: settings.time_scale.clamp(MIN_WARP, MAX_WARP),
            settings,
            sim,
            paused,
        }
    }

    /// Everything but `Quit`, which belongs to the frame loop.
    pub(crate) fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Rotate { dx, dy } => {
                let k = self.settings.drag_sensitivity;
                self.view.camera.rotate(dx * k, dy * k);
            }
            Command::Zoom(notches) => self.view.camera.dolly(notches * self.settings.zoom_units()),
            Command::TogglePause => self.paused = !self.paused,
            Command::ToggleMarkers => self.markers = !self.markers,
            Command::WarpFaster => self.warp = (self.warp * 2.0).min(MAX_WARP),
            Command::WarpSlower => self.warp = (self.warp * 0.5).max(MIN_WARP),
            Command::Reset => {
                self.sim.reset();
                self.view.camera = self.settings.camera();
                info!("reset bodies and camera");
            }
            Command::Quit => {}
        }
    }

    /// Step by a real-time `dt` scaled by the warp, unless paused.
    pub(crate) fn advance(&mut self, dt: f64) {
        if !self.paused {
            self.sim.step(dt * self.warp);
        }
    }
}

pub(crate) struct App {
    session: Session,
    buf: PixelBuffer,
    stars: Vec<Star>,
    term: Terminal,
    letterbox: Letterbox,
    drag: DragTracker,
    drawn: usize,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(settings: Settings, sim: Simulation, paused: bool) -> anyhow::Result<Self> {
        let term = Terminal::begin()?;
        let letterbox = Letterbox::fit(
            settings.width,
            settings.height,
            term.cols,
            term.rows.saturating_sub(HUD_ROWS),
        );
        Ok(Self {
            buf: PixelBuffer::new(settings.width, settings.height),
            stars: build_stars(settings.width, settings.height, settings.star_count, settings.seed),
            session: Session::new(settings, sim, paused),
            term,
            letterbox,
            drag: DragTracker::default(),
            drawn: 0,
            should_quit: false,
        })
    }

    pub(crate) fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.session.settings.fps_cap.clamp(5, 240);
        let frame_dt = Duration::from_secs_f64(1.0 / fps as f64);

        let mut clock = FrameClock::new();
        let mut frames: u64 = 0;
        let mut fps_frames: u32 = 0;
        let mut fps_timer = Instant::now();
        let mut fps_now: f64 = 0.0;

        while !self.should_quit {
            let frame_start = Instant::now();

            if self.term.resize_if_needed()? {
                self.letterbox = Letterbox::fit(
                    self.session.settings.width,
                    self.session.settings.height,
                    self.term.cols,
                    self.term.rows.saturating_sub(HUD_ROWS),
                );
                info!("terminal resized to {}x{}", self.term.cols, self.term.rows);
            }

            let px_per_cell = self.letterbox.pixels_per_cell();
            for cmd in collect_commands(&mut self.drag, px_per_cell)? {
                match cmd {
                    Command::Quit => self.should_quit = true,
                    other => self.session.apply(other),
                }
            }

            self.session.advance(clock.tick(frame_start));

            let s = &self.session;
            self.drawn = render_frame(&mut self.buf, &s.sim.bodies, &self.stars, &s.view, s.markers);
            self.draw(fps_now);
            self.term.present()?;

            frames += 1;
            fps_frames += 1;
            if fps_timer.elapsed() >= Duration::from_secs(1) {
                fps_now = fps_frames as f64 / fps_timer.elapsed().as_secs_f64();
                debug!(
                    "fps {:.1}  sim t {:.1}s  drawn {}/{}",
                    fps_now,
                    self.session.sim.time,
                    self.drawn,
                    self.session.sim.bodies.len()
                );
                fps_frames = 0;
                fps_timer = Instant::now();
            }

            let spent = frame_start.elapsed();
            if spent < frame_dt {
                std::thread::sleep(frame_dt - spent);
            }
        }

        info!(
            "quit after {} frames, {} simulated",
            frames,
            format_sim_time(self.session.sim.time)
        );
        Ok(())
    }

    fn draw(&mut self, fps: f64) {
        self.term.cur.clear();
        pixels_to_cells(&self.buf, &mut self.term.cur, HUD_ROWS, self.letterbox);

        let s = &self.session;
        let cam = s.view.camera;
        let line1 = format!(
            "orbitview  t {}  warp x{}  fps {:>5.1}{}",
            format_sim_time(s.sim.time),
            format_warp(s.warp),
            fps,
            if s.paused { "  [paused]" } else { "" }
        );
        let line2 = format!(
            "cam z {:.0} pitch {:.2} yaw {:.2}  drawn {}/{}  drag rotate  wheel/+- zoom  [ ] warp  space pause  m markers  r reset  q quit",
            cam.position.z,
            cam.pitch,
            cam.yaw,
            self.drawn,
            s.sim.bodies.len()
        );
        draw_text(&mut self.term.cur, 0, 0, &line1, Color::White, Color::Black);
        draw_text(&mut self.term.cur, 0, 1, &line2, Color::Grey, Color::Black);
    }
}

fn format_warp(w: f64) -> String {
    if w >= 1.0 {
        format!("{w:.0}")
    } else {
        format!("1/{:.0}", 1.0 / w)
    }
}

/// `3d 04:12:09` style; days only shown once non-zero.
pub(crate) fn format_sim_time(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    let days = total / 86_400;
    let h = (total % 86_400) / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    if days > 0 {
        format!("{days}d {h:02}:{m:02}:{s:02}")
    } else {
        format!("{h:02}:{m:02}:{s:02}")
    }
}
