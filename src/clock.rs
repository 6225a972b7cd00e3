use std::time::Instant;

/// Turns successive frame timestamps into per-frame time steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Seconds since the previous tick; 0 on the first one.
    pub fn tick(&mut self, now: Instant) -> f64 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }
}
