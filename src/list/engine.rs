//! The windowed list state machine shared by every table panel.

use web_time::{Duration, Instant};

use super::target::RenderTarget;
use super::window::{content_height, max_scroll, row_top, VisibleWindow};
use crate::options::{ListOptions, ScrollScheduling, TimingOptions};
use crate::schedule::{FrameScheduler, Throttle, Timer};

/// Static parameters of one list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    /// Fixed row height in pixels.
    pub row_height: f64,
    /// Rows rendered beyond each edge of the viewport.
    pub buffer_rows: usize,
    /// How scroll events are rate-limited.
    pub scheduling: ScrollScheduling,
    /// Throttle interval for [`ScrollScheduling::Throttle`].
    pub scroll_throttle: Duration,
    /// Frame interval for [`ScrollScheduling::Frame`].
    pub frame_interval: Duration,
    /// Delay before re-measuring a zero-height viewport.
    pub zero_height_retry: Duration,
    /// Re-measures before the fallback height is used.
    pub max_zero_height_retries: u32,
    /// Viewport height used once retries are exhausted.
    pub fallback_viewport_height: f64,
}

impl ListConfig {
    /// Combine per-list geometry with the shared timing settings.
    #[must_use]
    pub fn from_options(
        list: &ListOptions,
        timing: &TimingOptions,
        fallback_viewport_height: f64,
    ) -> Self {
        Self {
            row_height: list.row_height,
            buffer_rows: list.buffer_rows,
            scheduling: list.scheduling,
            scroll_throttle: timing.scroll_throttle(),
            frame_interval: timing.frame_interval(),
            zero_height_retry: timing.zero_height_retry(),
            max_zero_height_retries: timing.max_zero_height_retries,
            fallback_viewport_height,
        }
    }
}

/// Rate limiter in front of scroll-driven recomputes.
#[derive(Debug, Clone)]
enum ScrollGate {
    Throttle(Throttle),
    Frame(FrameScheduler),
}

impl ScrollGate {
    fn new(config: &ListConfig) -> Self {
        match config.scheduling {
            ScrollScheduling::Throttle => {
                Self::Throttle(Throttle::new(config.scroll_throttle))
            }
            ScrollScheduling::Frame => {
                Self::Frame(FrameScheduler::new(config.frame_interval))
            }
        }
    }

    fn cancel(&mut self) {
        match self {
            Self::Throttle(t) => t.reset(),
            Self::Frame(f) => f.cancel(),
        }
    }
}

/// Virtual-scroll engine over an ordered sequence of records.
///
/// `full` holds every record; `filtered` holds indices into `full` in
/// original order. Only rows inside [`VisibleWindow`] are ever drawn, each
/// at `index * row_height` inside content `len(filtered) * row_height`
/// tall.
#[derive(Debug)]
pub struct WindowedList<R> {
    config: ListConfig,
    full: Vec<R>,
    filtered: Vec<usize>,
    scroll_offset: f64,
    viewport_height: f64,
    window: VisibleWindow,
    gate: ScrollGate,
    dirty: bool,
    retry: Timer,
    retries: u32,
}

impl<R> WindowedList<R> {
    /// Empty list with `config`.
    #[must_use]
    pub fn new(config: ListConfig) -> Self {
        let gate = ScrollGate::new(&config);
        Self {
            config,
            full: Vec::new(),
            filtered: Vec::new(),
            scroll_offset: 0.0,
            viewport_height: 0.0,
            window: VisibleWindow::EMPTY,
            gate,
            dirty: false,
            retry: Timer::new(),
            retries: 0,
        }
    }

    /// Replace every record and reset to the identity filter.
    ///
    /// The scroll offset is kept, clamped to the new extent. Calling this
    /// twice with the same records leaves the same state.
    pub fn set_sequence(&mut self, records: Vec<R>) {
        self.full = records;
        self.filtered = (0..self.full.len()).collect();
        self.clamp_scroll();
        self.recompute();
        self.dirty = true;
    }

    /// Keep only records matching `predicate`, scanning `full` afresh.
    ///
    /// Resets the scroll offset to the top.
    pub fn apply_filter<P>(&mut self, predicate: P)
    where
        P: Fn(&R) -> bool,
    {
        self.filtered = self
            .full
            .iter()
            .enumerate()
            .filter(|(_, record)| predicate(record))
            .map(|(index, _)| index)
            .collect();
        self.scroll_offset = 0.0;
        self.recompute();
        self.dirty = true;
        log::debug!(
            "filter kept {} of {} records",
            self.filtered.len(),
            self.full.len()
        );
    }

    /// Drop the filter so every record is shown again.
    pub fn clear_filter(&mut self) {
        self.apply_filter(|_| true);
    }

    /// Record a scroll position reported by the host.
    ///
    /// The offset is always stored; the recompute is rate-limited by the
    /// configured [`ScrollScheduling`].
    pub fn on_scroll(&mut self, offset: f64, now: Instant) {
        self.scroll_offset = if offset.is_finite() {
            offset.max(0.0)
        } else {
            0.0
        };
        match &mut self.gate {
            ScrollGate::Throttle(throttle) => {
                if throttle.try_acquire(now) {
                    self.recompute();
                    self.dirty = true;
                }
            }
            ScrollGate::Frame(frames) => {
                let _ = frames.request(now);
            }
        }
    }

    /// Record a measured viewport height.
    ///
    /// A zero height (hidden element, layout in flight) does not produce a
    /// zero-row window: the measurement is retried after a short delay, and
    /// once retries run out the fallback height is used instead.
    pub fn on_resize(&mut self, height: f64, now: Instant) {
        if height > 0.0 && height.is_finite() {
            self.retry.disarm();
            self.retries = 0;
            if height != self.viewport_height {
                self.viewport_height = height;
                self.recompute();
                self.dirty = true;
            }
            return;
        }
        if self.retry.is_armed() {
            return;
        }
        if self.retries < self.config.max_zero_height_retries {
            self.retries += 1;
            self.retry.arm(now, self.config.zero_height_retry);
            log::trace!("viewport height is 0, retry {}", self.retries);
        } else if self.viewport_height <= 0.0 {
            log::debug!(
                "viewport height still 0, using fallback {}",
                self.config.fallback_viewport_height
            );
            self.viewport_height = self.config.fallback_viewport_height;
            self.recompute();
            self.dirty = true;
        }
    }

    /// Recompute the visible window from the current offset and height.
    pub fn recompute(&mut self) {
        self.window = VisibleWindow::compute(
            self.filtered.len(),
            self.config.row_height,
            self.config.buffer_rows,
            self.scroll_offset,
            self.viewport_height,
        );
        log::trace!(
            "window {}..{} of {}",
            self.window.start,
            self.window.end,
            self.filtered.len()
        );
    }

    /// Force a redraw on the next [`render`](Self::render).
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Redraw the window into `target` if anything changed.
    ///
    /// The viewport is re-measured first. While its height is zero the
    /// redraw is deferred and stays pending. Returns whether rows were
    /// drawn.
    pub fn render(
        &mut self,
        target: &mut dyn RenderTarget<R>,
        now: Instant,
    ) -> bool {
        let measured = target.viewport_height();
        if measured != self.viewport_height || measured <= 0.0 {
            self.on_resize(measured, now);
        }
        if !self.dirty || self.viewport_height <= 0.0 {
            return false;
        }

        target.clear_rows();
        target.set_content_height(content_height(
            self.filtered.len(),
            self.config.row_height,
        ));
        for index in self.window.range() {
            if let Some(record) = self.filtered_get(index) {
                target.draw_row(
                    index,
                    row_top(index, self.config.row_height),
                    record,
                );
            }
        }
        self.dirty = false;
        true
    }

    /// Advance deferred work and redraw if needed.
    ///
    /// Fires the zero-height retry, the frame-coalesced scroll recompute,
    /// and then [`render`](Self::render). `target` is `None` when the
    /// list's anchor is absent, in which case nothing is drawn and the
    /// redraw stays pending.
    pub fn tick(
        &mut self,
        now: Instant,
        target: Option<&mut dyn RenderTarget<R>>,
    ) -> bool {
        if let ScrollGate::Frame(frames) = &mut self.gate {
            if frames.poll(now) {
                self.recompute();
                self.dirty = true;
            }
        }
        let Some(target) = target else {
            return false;
        };
        if self.retry.poll(now) {
            self.on_resize(target.viewport_height(), now);
        }
        self.render(target, now)
    }

    /// Drop every record and pending scroll work.
    pub fn clear(&mut self) {
        self.full.clear();
        self.filtered.clear();
        self.scroll_offset = 0.0;
        self.window = VisibleWindow::EMPTY;
        self.gate.cancel();
        self.dirty = true;
    }

    /// Current visible window.
    #[must_use]
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    /// Current scroll offset in pixels.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Last viewport height used for the window.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Row height in pixels.
    #[must_use]
    pub fn row_height(&self) -> f64 {
        self.config.row_height
    }

    /// Buffer rows on each side.
    #[must_use]
    pub fn buffer_rows(&self) -> usize {
        self.config.buffer_rows
    }

    /// Whether a redraw is pending.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// All records in load order.
    #[must_use]
    pub fn full(&self) -> &[R] {
        &self.full
    }

    /// Number of records in the filtered sequence.
    #[must_use]
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Indices into [`full`](Self::full) that pass the current filter.
    #[must_use]
    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    /// The filtered sequence in order.
    pub fn filtered(&self) -> impl Iterator<Item = &R> + '_ {
        self.filtered.iter().filter_map(|&i| self.full.get(i))
    }

    /// Record at position `index` of the filtered sequence.
    #[must_use]
    pub fn filtered_get(&self, index: usize) -> Option<&R> {
        self.filtered.get(index).and_then(|&i| self.full.get(i))
    }

    /// Records currently inside the window, with their filtered index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &R)> + '_ {
        self.window
            .range()
            .filter_map(|i| self.filtered_get(i).map(|r| (i, r)))
    }

    fn clamp_scroll(&mut self) {
        let max = max_scroll(
            self.filtered.len(),
            self.config.row_height,
            self.viewport_height,
        );
        self.scroll_offset = self.scroll_offset.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::target::{RowBuffer, TableRow};

    impl TableRow for u32 {
        fn cells(&self) -> Vec<String> {
            vec![self.to_string()]
        }
    }

    fn config(scheduling: ScrollScheduling) -> ListConfig {
        ListConfig {
            row_height: 20.0,
            buffer_rows: 2,
            scheduling,
            scroll_throttle: Duration::from_millis(16),
            frame_interval: Duration::from_millis(16),
            zero_height_retry: Duration::from_millis(50),
            max_zero_height_retries: 3,
            fallback_viewport_height: 300.0,
        }
    }

    fn list(n: u32, scheduling: ScrollScheduling) -> WindowedList<u32> {
        let mut list = WindowedList::new(config(scheduling));
        list.set_sequence((0..n).collect());
        list
    }

    #[test]
    fn renders_only_the_window() {
        let now = Instant::now();
        let mut list = list(1_000, ScrollScheduling::Frame);
        let mut target = RowBuffer::new(100.0);
        assert!(list.render(&mut target, now));
        // ceil(100 / 20) + 2 * 2
        assert_eq!(target.rows().len(), 9);
        assert_eq!(target.content_height(), 20_000.0);
        assert_eq!(target.rows()[3].top, 60.0);
        assert_eq!(target.rows()[3].cells, vec!["3".to_owned()]);
        // Nothing changed, nothing redrawn
        assert!(!list.render(&mut target, now));
        assert_eq!(target.redraws(), 1);
    }

    #[test]
    fn filter_rescans_full_and_resets_scroll() {
        let now = Instant::now();
        let mut list = list(100, ScrollScheduling::Throttle);
        list.on_resize(200.0, now);
        list.on_scroll(400.0, now);
        list.apply_filter(|v| v % 2 == 0);
        assert_eq!(list.scroll_offset(), 0.0);
        assert_eq!(list.filtered_len(), 50);
        list.apply_filter(|v| v % 5 == 0);
        // Not composed with the previous filter
        assert_eq!(list.filtered_len(), 20);
        assert_eq!(list.filtered_get(1), Some(&5));
        list.clear_filter();
        assert_eq!(list.filtered_len(), 100);
    }

    #[test]
    fn set_sequence_is_idempotent_and_clamps() {
        let now = Instant::now();
        let mut list = list(100, ScrollScheduling::Throttle);
        list.on_resize(200.0, now);
        list.on_scroll(1_500.0, now);
        list.set_sequence((0..10).collect());
        // 10 rows * 20 px fit in the viewport
        assert_eq!(list.scroll_offset(), 0.0);
        let (window, filtered) =
            (list.window(), list.filtered_indices().to_vec());
        list.set_sequence((0..10).collect());
        assert_eq!(list.window(), window);
        assert_eq!(list.filtered_indices(), filtered.as_slice());
    }

    #[test]
    fn throttled_scroll_drops_trailing_events() {
        let t0 = Instant::now();
        let mut list = list(1_000, ScrollScheduling::Throttle);
        list.on_resize(100.0, t0);
        list.on_scroll(200.0, t0);
        assert_eq!(list.window().start, 8);
        list.on_scroll(400.0, t0 + Duration::from_millis(5));
        // Suppressed: offset stored, window unchanged
        assert_eq!(list.scroll_offset(), 400.0);
        assert_eq!(list.window().start, 8);
        list.on_scroll(600.0, t0 + Duration::from_millis(20));
        assert_eq!(list.window().start, 28);
    }

    #[test]
    fn frame_scroll_coalesces_until_tick() {
        let t0 = Instant::now();
        let mut list = list(1_000, ScrollScheduling::Frame);
        let mut target = RowBuffer::new(100.0);
        assert!(list.tick(t0, Some(&mut target)));
        list.on_scroll(200.0, t0);
        list.on_scroll(2_000.0, t0 + Duration::from_millis(1));
        assert_eq!(list.window().start, 0);
        assert!(list.tick(t0 + Duration::from_millis(16), Some(&mut target)));
        assert_eq!(list.window().start, 98);
        assert_eq!(target.rows()[0].index, 98);
        assert_eq!(target.redraws(), 2);
    }

    #[test]
    fn zero_height_defers_then_recovers() {
        let t0 = Instant::now();
        let mut list = list(1_000, ScrollScheduling::Frame);
        let mut target = RowBuffer::new(0.0);
        assert!(!list.tick(t0, Some(&mut target)));
        assert!(list.is_dirty());
        assert_eq!(target.redraws(), 0);

        // Tab becomes visible before the retry fires
        target.set_viewport_height(120.0);
        assert!(list.tick(t0 + Duration::from_millis(50), Some(&mut target)));
        assert_eq!(target.rows().len(), 10);
    }

    #[test]
    fn zero_height_falls_back_after_retries() {
        let t0 = Instant::now();
        let mut list = list(1_000, ScrollScheduling::Frame);
        let mut target = RowBuffer::new(0.0);
        let mut now = t0;
        for _ in 0..10 {
            let _ = list.tick(now, Some(&mut target));
            now += Duration::from_millis(50);
        }
        assert_eq!(list.viewport_height(), 300.0);
        // ceil(300 / 20) + 4
        assert_eq!(target.rows().len(), 19);
    }

    #[test]
    fn missing_anchor_keeps_redraw_pending() {
        let now = Instant::now();
        let mut list = list(10, ScrollScheduling::Frame);
        assert!(!list.tick(now, None));
        assert!(list.is_dirty());
    }

    #[test]
    fn empty_sequence_renders_no_rows() {
        let now = Instant::now();
        let mut list = list(0, ScrollScheduling::Frame);
        let mut target = RowBuffer::new(100.0);
        assert!(list.render(&mut target, now));
        assert!(target.rows().is_empty());
        assert_eq!(list.window(), VisibleWindow::EMPTY);
    }
}
