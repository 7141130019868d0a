use web_time::{Duration, Instant};

use super::task::TaskSlot;

/// Trailing-edge debounce over a payload.
///
/// Every [`call`](Self::call) restarts the quiet period; the payload of the
/// last call in a burst becomes available from [`poll`](Self::poll) once
/// `wait` has elapsed without another call.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    wait: Duration,
    slot: TaskSlot<T>,
}

impl<T> Debounce<T> {
    /// Debounce with the given quiet period.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            slot: TaskSlot::new(),
        }
    }

    /// Quiet period.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Record a trigger at `now`, superseding any pending payload.
    pub fn call(&mut self, payload: T, now: Instant) {
        let _ = self.slot.schedule(now + self.wait, payload);
    }

    /// Payload of the last call, once the quiet period has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        self.slot.poll(now)
    }

    /// Drop the pending payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.slot.cancel()
    }

    /// Whether a payload is waiting for its quiet period.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    /// When the pending payload becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.slot.deadline()
    }
}

/// A [`Debounce`] bound to the callback it gates.
pub struct Debounced<T, F> {
    gate: Debounce<T>,
    callback: F,
}

impl<T, F: FnMut(T)> Debounced<T, F> {
    /// Wrap `callback` so it fires `wait` after the last call.
    #[must_use]
    pub fn new(wait: Duration, callback: F) -> Self {
        Self {
            gate: Debounce::new(wait),
            callback,
        }
    }

    /// Trigger with `args`; restarts the quiet period.
    pub fn call(&mut self, args: T, now: Instant) {
        self.gate.call(args, now);
    }

    /// Invoke the callback if the quiet period has elapsed. Returns whether
    /// it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(args) = self.gate.poll(now) else {
            return false;
        };
        (self.callback)(args);
        true
    }

    /// Cancel the pending invocation.
    pub fn cancel(&mut self) {
        let _ = self.gate.cancel();
    }
}
