//! Render-rate sampling for the coalesced 3D renders.

use web_time::{Duration, Instant};

/// Length of one FPS sampling window.
const WINDOW: Duration = Duration::from_secs(1);

/// Render-rate monitor: counts coalesced renders per one-second window and
/// warns when the rate drops below a threshold.
#[derive(Debug, Clone)]
pub struct RenderMonitor {
    /// Renders below this rate are reported
    warn_below: f32,
    /// Start of the current sampling window
    window_start: Option<Instant>,
    /// Renders counted in the current window
    frames: u32,
    /// Rate measured over the last complete window
    last_fps: Option<f32>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Windows that fell below the threshold
    slow_windows: u32,
}

impl RenderMonitor {
    /// Create a monitor that warns when a window's rate is below
    /// `warn_below` frames per second.
    #[must_use]
    pub fn new(warn_below: f32) -> Self {
        Self {
            warn_below,
            window_start: None,
            frames: 0,
            last_fps: None,
            smoothed_fps: 60.0,
            smoothing: 0.25,
            slow_windows: 0,
        }
    }

    /// Record one render at `now`. Returns the measured rate when this
    /// render closes a sampling window.
    ///
    /// The first render only opens the window; each window then counts
    /// the renders after its start, including the one that closes it.
    pub fn track_render(&mut self, now: Instant) -> Option<f32> {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            self.frames = 0;
            return None;
        };
        self.frames += 1;
        let elapsed = now.saturating_duration_since(start);
        if elapsed < WINDOW {
            return None;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.smoothed_fps = fps
            .mul_add(self.smoothing, self.smoothed_fps * (1.0 - self.smoothing));
        self.last_fps = Some(fps);
        self.window_start = Some(now);
        self.frames = 0;

        if fps < self.warn_below {
            self.slow_windows += 1;
            log::warn!("Low FPS detected: {fps:.1}");
        }
        Some(fps)
    }

    /// Rate of the last complete window.
    #[must_use]
    pub fn fps(&self) -> Option<f32> {
        self.last_fps
    }

    /// Smoothed rate across windows.
    #[must_use]
    pub fn smoothed_fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Number of windows that fell below the threshold.
    #[must_use]
    pub fn slow_windows(&self) -> u32 {
        self.slow_windows
    }

    /// Forget the current window, e.g. after the view was hidden.
    pub fn reset(&mut self) {
        self.window_start = None;
        self.frames = 0;
    }
}
