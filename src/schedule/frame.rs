use web_time::{Duration, Instant};

/// Coalesces render requests to at most one per display frame.
///
/// A request made while another is pending is a no-op; the pending request
/// fires on the first poll at or after its frame boundary.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    interval: Duration,
    pending: Option<Instant>,
    last_fired: Option<Instant>,
}

impl FrameScheduler {
    /// Scheduler for a display refreshing every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            last_fired: None,
        }
    }

    /// Request a frame. Returns `false` if one was already scheduled.
    pub fn request(&mut self, now: Instant) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let due = self
            .last_fired
            .map_or(now, |last| (last + self.interval).max(now));
        self.pending = Some(due);
        true
    }

    /// Drop the pending frame, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a frame is scheduled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns `true` when the scheduled frame is due; clears it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(due) if now >= due => {
                self.pending = None;
                self.last_fired = Some(now);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_requests_coalesce() {
        let now = Instant::now();
        let mut frames = FrameScheduler::new(Duration::from_millis(16));
        assert!(frames.request(now));
        assert!(!frames.request(now));
        assert!(!frames.request(now + Duration::from_millis(1)));
        assert!(frames.poll(now + Duration::from_millis(1)));
        assert!(!frames.poll(now + Duration::from_millis(2)));
    }

    #[test]
    fn frames_are_spaced_by_interval() {
        let now = Instant::now();
        let interval = Duration::from_millis(16);
        let mut frames = FrameScheduler::new(interval);
        let _ = frames.request(now);
        assert!(frames.poll(now));
        let _ = frames.request(now + Duration::from_millis(1));
        assert!(!frames.poll(now + Duration::from_millis(15)));
        assert!(frames.poll(now + interval));
    }

    #[test]
    fn cancel_drops_pending_frame() {
        let now = Instant::now();
        let mut frames = FrameScheduler::new(Duration::from_millis(16));
        let _ = frames.request(now);
        frames.cancel();
        assert!(!frames.poll(now + Duration::from_secs(1)));
        assert!(frames.request(now + Duration::from_secs(1)));
    }
}
