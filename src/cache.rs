//! Time-expiring key/value caches for remote data.
//!
//! Expiry is lazy: an entry older than `max_age` is dropped when it is next
//! read, never by a background sweep. Capacity is managed separately by
//! [`CacheSet::sweep_at`], which flushes whole caches that grew past their
//! thresholds.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use web_time::{Duration, Instant};

use crate::options::{CacheOptions, CachePolicy};
use crate::schedule::Timer;
use crate::service::{Citation, EntryInfo, ServiceError};

/// A cached value and the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Whether the entry is older than `max_age` at `now`.
    fn is_expired(&self, max_age: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > max_age
    }
}

/// Key/value store with per-entry expiration.
#[derive(Debug, Clone)]
pub struct TimedCache<K, V> {
    max_age: Duration,
    entries: FxHashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V> TimedCache<K, V> {
    /// Empty cache whose entries live for `max_age`.
    #[must_use]
    pub fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            entries: FxHashMap::default(),
        }
    }

    /// Entry lifetime.
    #[must_use]
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Store `value` under `key`, stamped with the current time.
    pub fn set(&mut self, key: K, value: V) {
        self.set_at(key, value, Instant::now());
    }

    /// Store `value` under `key`, stamped with `now`. Overwrites any prior
    /// entry.
    pub fn set_at(&mut self, key: K, value: V, now: Instant) {
        let _ = self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    /// Look up `key` at the current time.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_at(key, Instant::now())
    }

    /// Look up `key` as of `now`. An expired entry is removed and reported
    /// absent.
    pub fn get_at<Q>(&mut self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = self.entries.get(key)?.is_expired(self.max_age, now);
        if expired {
            let _ = self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included until accessed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cached outcome of an existence check. Only authoritative answers are
/// stored; see [`ServiceError::is_cacheable`].
pub type ExistenceOutcome = Result<EntryInfo, ServiceError>;

/// Which caches a capacity sweep flushed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SweepReport {
    /// Whether the sweep interval had elapsed and thresholds were checked.
    pub checked: bool,
    /// Structure-text cache was flushed.
    pub structures: bool,
    /// Existence-check cache was flushed.
    pub existence: bool,
    /// Citation cache was flushed.
    pub citations: bool,
}

impl SweepReport {
    /// Whether anything was flushed.
    #[must_use]
    pub fn flushed_any(&self) -> bool {
        self.structures || self.existence || self.citations
    }
}

/// The three process-wide caches, owned by the application context.
#[derive(Debug)]
pub struct CacheSet {
    /// Downloaded structure text keyed by PDB id.
    pub structures: TimedCache<String, String>,
    /// Existence-check results keyed by PDB id.
    pub existence: TimedCache<String, ExistenceOutcome>,
    /// Enriched citation lists keyed by PDB id.
    pub citations: TimedCache<String, Vec<Citation>>,
    policy: CacheOptions,
    sweep: Timer,
}

impl CacheSet {
    /// Build the caches from `options` and arm the first capacity sweep.
    #[must_use]
    pub fn new(options: &CacheOptions, now: Instant) -> Self {
        let mut sweep = Timer::new();
        sweep.arm(now, options.sweep_interval());
        Self {
            structures: TimedCache::new(options.structures.max_age()),
            existence: TimedCache::new(options.existence.max_age()),
            citations: TimedCache::new(options.citations.max_age()),
            policy: options.clone(),
            sweep,
        }
    }

    /// Run the periodic capacity check if its interval has elapsed.
    ///
    /// When any cache exceeds its `sweep_above` threshold, every cache
    /// holding more than its `flush_above` entries is cleared outright.
    pub fn sweep_at(&mut self, now: Instant) -> SweepReport {
        if !self.sweep.poll(now) {
            return SweepReport::default();
        }
        self.sweep.arm(now, self.policy.sweep_interval());

        let over = |len: usize, policy: &CachePolicy| len > policy.sweep_above;
        let mut report = SweepReport {
            checked: true,
            ..SweepReport::default()
        };
        if !(over(self.structures.len(), &self.policy.structures)
            || over(self.existence.len(), &self.policy.existence)
            || over(self.citations.len(), &self.policy.citations))
        {
            return report;
        }

        report.structures =
            flush_if_above(&mut self.structures, &self.policy.structures);
        report.existence =
            flush_if_above(&mut self.existence, &self.policy.existence);
        report.citations =
            flush_if_above(&mut self.citations, &self.policy.citations);
        log::info!(
            "cache sweep flushed structures={} existence={} citations={}",
            report.structures,
            report.existence,
            report.citations
        );
        report
    }

    /// Flush every cache unconditionally.
    pub fn clear_all(&mut self) {
        self.structures.clear();
        self.existence.clear();
        self.citations.clear();
    }
}

fn flush_if_above<K: Eq + Hash, V>(
    cache: &mut TimedCache<K, V>,
    policy: &CachePolicy,
) -> bool {
    if cache.len() > policy.flush_above {
        cache.clear();
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_visible_up_to_max_age() {
        let t0 = Instant::now();
        let max_age = Duration::from_secs(600);
        let mut cache = TimedCache::new(max_age);
        cache.set_at("1CRN".to_owned(), 7, t0);
        assert_eq!(cache.get_at("1CRN", t0 + max_age), Some(&7));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_entry_is_removed_on_access() {
        let t0 = Instant::now();
        let max_age = Duration::from_secs(600);
        let mut cache = TimedCache::new(max_age);
        cache.set_at("1CRN".to_owned(), 7, t0);
        let late = t0 + max_age + Duration::from_millis(1);
        assert_eq!(cache.get_at("1CRN", late), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn expired_entries_linger_until_accessed() {
        let t0 = Instant::now();
        let mut cache = TimedCache::new(Duration::from_secs(1));
        cache.set_at("a".to_owned(), 1, t0);
        cache.set_at("b".to_owned(), 2, t0);
        let _ = cache.get_at("a", t0 + Duration::from_secs(5));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn set_overwrites_and_restamps() {
        let t0 = Instant::now();
        let max_age = Duration::from_secs(10);
        let mut cache = TimedCache::new(max_age);
        cache.set_at("k".to_owned(), 1, t0);
        cache.set_at("k".to_owned(), 2, t0 + Duration::from_secs(8));
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(15)), Some(&2));
    }

    fn fill(set: &mut CacheSet, structures: usize, existence: usize, now: Instant) {
        for i in 0..structures {
            set.structures.set_at(format!("S{i:03}"), String::new(), now);
        }
        for i in 0..existence {
            set.existence.set_at(
                format!("E{i:03}"),
                Err(ServiceError::NotFound { id: String::new() }),
                now,
            );
        }
    }

    #[test]
    fn sweep_waits_for_interval() {
        let t0 = Instant::now();
        let options = CacheOptions::default();
        let mut set = CacheSet::new(&options, t0);
        fill(&mut set, 20, 0, t0);
        let report = set.sweep_at(t0 + Duration::from_secs(10));
        assert!(!report.checked);
        assert_eq!(set.structures.len(), 20);
    }

    #[test]
    fn sweep_flushes_caches_over_threshold() {
        let t0 = Instant::now();
        let options = CacheOptions::default();
        let mut set = CacheSet::new(&options, t0);
        // structures over trigger (10); existence over flush (50) but under
        // its own trigger (100).
        fill(&mut set, 11, 60, t0);
        let report = set.sweep_at(t0 + options.sweep_interval());
        assert!(report.checked);
        assert!(report.structures);
        assert!(report.existence);
        assert!(!report.citations);
        assert!(set.structures.is_empty());
        assert!(set.existence.is_empty());
    }

    #[test]
    fn sweep_keeps_caches_under_triggers() {
        let t0 = Instant::now();
        let options = CacheOptions::default();
        let mut set = CacheSet::new(&options, t0);
        fill(&mut set, 5, 60, t0);
        let report = set.sweep_at(t0 + options.sweep_interval());
        assert!(report.checked);
        assert!(!report.flushed_any());
        assert_eq!(set.existence.len(), 60);
    }
}
