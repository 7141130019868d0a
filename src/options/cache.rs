use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Lifetime and capacity thresholds for one cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(inline)]
pub struct CachePolicy {
    /// Seconds an entry stays valid after it was stored.
    #[schemars(title = "Max Age (s)", range(min = 1))]
    pub max_age_secs: u64,
    /// A periodic sweep acts only when some cache holds more entries than
    /// its `sweep_above`.
    #[schemars(title = "Sweep Above")]
    pub sweep_above: usize,
    /// During an active sweep, caches holding more than this are cleared.
    #[schemars(title = "Flush Above")]
    pub flush_above: usize,
}

impl CachePolicy {
    /// Entry lifetime as a [`Duration`].
    #[must_use]
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Caches", inline)]
#[serde(default)]
/// Expiry and capacity settings for the remote-data caches.
pub struct CacheOptions {
    /// Downloaded structure text.
    pub structures: CachePolicy,
    /// Existence-check results.
    pub existence: CachePolicy,
    /// Citation lists.
    pub citations: CachePolicy,
    /// Seconds between capacity sweeps.
    #[schemars(title = "Sweep Interval (s)", range(min = 1))]
    pub sweep_interval_secs: u64,
}

impl CacheOptions {
    /// Sweep interval as a [`Duration`].
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            structures: CachePolicy {
                max_age_secs: 30 * 60,
                sweep_above: 10,
                flush_above: 3,
            },
            existence: CachePolicy {
                max_age_secs: 60 * 60,
                sweep_above: 100,
                flush_above: 50,
            },
            citations: CachePolicy {
                max_age_secs: 10 * 60,
                sweep_above: 20,
                flush_above: 8,
            },
            sweep_interval_secs: 5 * 60,
        }
    }
}
