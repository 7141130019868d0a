//! Visible index range math for fixed-height rows.

use std::ops::Range;

/// Half-open index range `[start, end)` of rows to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    /// First rendered index.
    pub start: usize,
    /// One past the last rendered index.
    pub end: usize,
}

impl VisibleWindow {
    /// The empty window `[0, 0)`.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Window for `len` rows of `row_height` pixels, scrolled to
    /// `scroll_offset` in a viewport `viewport_height` pixels tall, padded
    /// by `buffer_rows` on each side.
    ///
    /// `start = floor(S / R) - B` and `end = start + ceil(H / R) + 2B`, both
    /// clamped to `[0, len]`. A non-positive row height yields the empty
    /// window.
    #[must_use]
    pub fn compute(
        len: usize,
        row_height: f64,
        buffer_rows: usize,
        scroll_offset: f64,
        viewport_height: f64,
    ) -> Self {
        if len == 0 || row_height.is_nan() || row_height <= 0.0 {
            return Self::EMPTY;
        }
        // Float-to-int `as` saturates (NaN -> 0), which is the clamp we want.
        let first_row = (scroll_offset.max(0.0) / row_height).floor() as usize;
        let viewport_rows =
            (viewport_height.max(0.0) / row_height).ceil() as usize;

        let start = first_row.saturating_sub(buffer_rows).min(len);
        let end = start
            .saturating_add(viewport_rows)
            .saturating_add(buffer_rows.saturating_mul(2))
            .min(len);
        Self { start, end }
    }

    /// Number of rows in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `index` is rendered.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }

    /// The window as a range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Top pixel offset of row `index`.
#[must_use]
pub fn row_top(index: usize, row_height: f64) -> f64 {
    index as f64 * row_height
}

/// Height of the scroll content holding `len` rows.
#[must_use]
pub fn content_height(len: usize, row_height: f64) -> f64 {
    len as f64 * row_height
}

/// Largest scroll offset that still shows content for `len` rows.
#[must_use]
pub fn max_scroll(len: usize, row_height: f64, viewport_height: f64) -> f64 {
    (content_height(len, row_height) - viewport_height).max(0.0)
}
