use std::time::Instant;

/// Length of one measurement window.
const WINDOW_MS: u64 = 1000;

/// Windowed frames-per-second estimate.
///
/// Frames are counted until more than a second has passed; then the rate
/// for that window is computed and the window restarts. Between updates the
/// last computed value is reported.
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: f64,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Counts one frame at `now` and returns the value to display.
    pub fn tick(&mut self, now: Instant) -> u32 {
        self.frames += 1;
        let elapsed_ms = now.saturating_duration_since(self.window_start).as_millis() as u64;
        if elapsed_ms > WINDOW_MS {
            self.fps = frames_per_second(self.frames, elapsed_ms);
            self.frames = 0;
            self.window_start = now;
        }
        self.current()
    }

    pub fn current(&self) -> u32 {
        self.fps as u32
    }
}

/// `frames / (elapsed_ms / 1000)`.
pub fn frames_per_second(frames: u32, elapsed_ms: u64) -> f64 {
    if elapsed_ms == 0 {
        return 0.0;
    }
    frames as f64 / (elapsed_ms as f64 / 1000.0)
}
