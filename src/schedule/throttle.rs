use web_time::{Duration, Instant};

/// Leading-edge throttle: the first call passes, later calls are dropped
/// until `limit` has elapsed. Dropped calls are not queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    suppressed_until: Option<Instant>,
}

impl Throttle {
    /// Throttle allowing one call per `limit`.
    #[must_use]
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            suppressed_until: None,
        }
    }

    /// Suppression window.
    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Returns `true` if a call at `now` may go through, and opens a new
    /// suppression window when it does.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if self.suppressed_until.is_some_and(|until| now < until) {
            return false;
        }
        self.suppressed_until = Some(now + self.limit);
        true
    }

    /// Whether a call at `now` would be dropped.
    #[must_use]
    pub fn is_suppressed(&self, now: Instant) -> bool {
        self.suppressed_until.is_some_and(|until| now < until)
    }

    /// Forget the current suppression window.
    pub fn reset(&mut self) {
        self.suppressed_until = None;
    }
}

/// A [`Throttle`] bound to the callback it gates.
pub struct Throttled<F> {
    gate: Throttle,
    callback: F,
}

impl<F> Throttled<F> {
    /// Wrap `callback` so it runs at most once per `limit`.
    #[must_use]
    pub fn new(limit: Duration, callback: F) -> Self {
        Self {
            gate: Throttle::new(limit),
            callback,
        }
    }

    /// Invoke immediately unless suppressed. Returns the callback's result
    /// when it ran.
    pub fn call<A, R>(&mut self, args: A, now: Instant) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.gate.try_acquire(now) {
            Some((self.callback)(args))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_within_limit_invokes_once() {
        let start = Instant::now();
        let mut calls = 0;
        {
            let mut throttled =
                Throttled::new(Duration::from_millis(150), |()| calls += 1);
            for ms in [0, 10, 50, 149] {
                let _ = throttled.call((), start + Duration::from_millis(ms));
            }
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn call_after_limit_passes_immediately() {
        let start = Instant::now();
        let mut gate = Throttle::new(Duration::from_millis(16));
        assert!(gate.try_acquire(start));
        assert!(!gate.try_acquire(start + Duration::from_millis(15)));
        assert!(gate.try_acquire(start + Duration::from_millis(16)));
    }

    #[test]
    fn returns_first_callers_result() {
        let start = Instant::now();
        let mut throttled = Throttled::new(Duration::from_secs(1), |x: i32| x * 2);
        assert_eq!(throttled.call(3, start), Some(6));
        assert_eq!(throttled.call(4, start), None);
    }
}
