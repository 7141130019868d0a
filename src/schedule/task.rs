use web_time::{Duration, Instant};

/// A payload that becomes due at a fixed deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask<T> {
    deadline: Instant,
    payload: T,
}

impl<T> ScheduledTask<T> {
    /// Schedule `payload` to become due at `deadline`.
    #[must_use]
    pub fn new(deadline: Instant, payload: T) -> Self {
        Self { deadline, payload }
    }

    /// When the task becomes due.
    #[must_use]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the task is due at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Borrow the pending payload.
    #[must_use]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the task, yielding its payload.
    #[must_use]
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Holds at most one pending [`ScheduledTask`].
///
/// Scheduling into an occupied slot replaces (cancels) the previous task.
#[derive(Debug, Clone)]
pub struct TaskSlot<T> {
    task: Option<ScheduledTask<T>>,
}

impl<T> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<T> TaskSlot<T> {
    /// Empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` at `deadline`, returning the task it replaced.
    pub fn schedule(&mut self, deadline: Instant, payload: T) -> Option<T> {
        self.task
            .replace(ScheduledTask::new(deadline, payload))
            .map(ScheduledTask::into_payload)
    }

    /// Drop the pending task, if any, returning its payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.task.take().map(ScheduledTask::into_payload)
    }

    /// Whether a task is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Deadline of the pending task.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.task.as_ref().map(ScheduledTask::deadline)
    }

    /// Borrow the pending payload.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.task.as_ref().map(ScheduledTask::payload)
    }

    /// Take the payload if the pending task is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.task.as_ref().is_some_and(|t| t.is_due(now)) {
            self.cancel()
        } else {
            None
        }
    }
}

/// One-shot timer; used for auto-dismissing transient messages and for
/// deferred retries.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    slot: TaskSlot<()>,
}

impl Timer {
    /// Disarmed timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm so the timer fires `delay` after `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        let _ = self.slot.schedule(now + delay, ());
    }

    /// Cancel without firing.
    pub fn disarm(&mut self) {
        let _ = self.slot.cancel();
    }

    /// Whether the timer is waiting to fire.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.slot.is_pending()
    }

    /// Returns `true` exactly once, on the first poll at or after the
    /// deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.slot.poll(now).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_replaces_pending_task() {
        let now = Instant::now();
        let mut slot = TaskSlot::new();
        assert_eq!(slot.schedule(now, 1), None);
        assert_eq!(slot.schedule(now, 2), Some(1));
        assert_eq!(slot.peek(), Some(&2));
    }

    #[test]
    fn slot_polls_only_when_due() {
        let now = Instant::now();
        let mut slot = TaskSlot::new();
        let _ = slot.schedule(now + Duration::from_millis(10), "x");
        assert_eq!(slot.poll(now), None);
        assert_eq!(slot.poll(now + Duration::from_millis(10)), Some("x"));
        assert!(!slot.is_pending());
    }

    #[test]
    fn timer_fires_once() {
        let now = Instant::now();
        let mut timer = Timer::new();
        timer.arm(now, Duration::from_secs(8));
        assert!(!timer.poll(now + Duration::from_secs(7)));
        assert!(timer.poll(now + Duration::from_secs(8)));
        assert!(!timer.poll(now + Duration::from_secs(9)));
    }

    #[test]
    fn disarmed_timer_never_fires() {
        let now = Instant::now();
        let mut timer = Timer::new();
        timer.arm(now, Duration::from_millis(1));
        timer.disarm();
        assert!(!timer.poll(now + Duration::from_secs(1)));
    }
}
