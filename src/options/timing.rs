use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
/// Debounce/throttle intervals and transient message lifetimes, in
/// milliseconds.
pub struct TimingOptions {
    /// Quiet period before a load-by-id request runs.
    #[schemars(title = "Load Debounce")]
    pub load_debounce_ms: u64,
    /// Quiet period after typing before the id is checked remotely.
    #[schemars(title = "Validation Debounce")]
    pub validation_debounce_ms: u64,
    /// Minimum spacing between style recomputes.
    #[schemars(title = "Style Throttle")]
    pub style_throttle_ms: u64,
    /// Minimum spacing between throttled scroll recomputes.
    #[schemars(title = "Scroll Throttle")]
    pub scroll_throttle_ms: u64,
    /// Display refresh interval used to coalesce renders.
    #[schemars(title = "Frame Interval")]
    pub frame_interval_ms: u64,
    /// Lifetime of the error banner.
    #[schemars(title = "Error Banner")]
    pub banner_dismiss_ms: u64,
    /// Lifetime of the "PDB exists" indicator.
    #[schemars(title = "Validation Indicator")]
    pub indicator_dismiss_ms: u64,
    /// Delay before re-measuring a viewport that reported zero height.
    #[schemars(title = "Zero Height Retry")]
    pub zero_height_retry_ms: u64,
    /// Retries before falling back to the configured viewport height.
    #[schemars(title = "Zero Height Retries")]
    pub max_zero_height_retries: u32,
}

impl TimingOptions {
    /// Load-by-id debounce.
    #[must_use]
    pub fn load_debounce(&self) -> Duration {
        Duration::from_millis(self.load_debounce_ms)
    }

    /// Live validation debounce.
    #[must_use]
    pub fn validation_debounce(&self) -> Duration {
        Duration::from_millis(self.validation_debounce_ms)
    }

    /// Style recompute throttle.
    #[must_use]
    pub fn style_throttle(&self) -> Duration {
        Duration::from_millis(self.style_throttle_ms)
    }

    /// Scroll recompute throttle.
    #[must_use]
    pub fn scroll_throttle(&self) -> Duration {
        Duration::from_millis(self.scroll_throttle_ms)
    }

    /// Display frame interval.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Error banner lifetime.
    #[must_use]
    pub fn banner_dismiss(&self) -> Duration {
        Duration::from_millis(self.banner_dismiss_ms)
    }

    /// Validation indicator lifetime.
    #[must_use]
    pub fn indicator_dismiss(&self) -> Duration {
        Duration::from_millis(self.indicator_dismiss_ms)
    }

    /// Zero-height re-measure delay.
    #[must_use]
    pub fn zero_height_retry(&self) -> Duration {
        Duration::from_millis(self.zero_height_retry_ms)
    }
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            load_debounce_ms: 300,
            validation_debounce_ms: 800,
            style_throttle_ms: 150,
            scroll_throttle_ms: 16,
            frame_interval_ms: 16,
            banner_dismiss_ms: 8_000,
            indicator_dismiss_ms: 3_000,
            zero_height_retry_ms: 50,
            max_zero_height_retries: 10,
        }
    }
}
