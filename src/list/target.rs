//! Render backends for windowed lists.
//!
//! The engine never touches a concrete UI toolkit. It asks a
//! [`RenderTarget`] for the viewport height and tells it which rows to draw
//! at which offsets; [`RowBuffer`] is the headless implementation used by
//! tests and by hosts that diff rows themselves.

/// A surface that can show a window of rows.
pub trait RenderTarget<R> {
    /// Current viewport height in pixels; 0 while hidden or mid-layout.
    fn viewport_height(&self) -> f64;

    /// Tear down every rendered row.
    fn clear_rows(&mut self);

    /// Size the scroll content to the full logical extent.
    fn set_content_height(&mut self, height: f64);

    /// Draw `record`, the row at filtered `index`, at `top` pixels.
    fn draw_row(&mut self, index: usize, top: f64, record: &R);
}

/// A record that knows how to present itself as a table row.
pub trait TableRow {
    /// Cell texts, left to right.
    fn cells(&self) -> Vec<String>;

    /// Style class for the whole row.
    fn row_class(&self) -> &'static str {
        ""
    }
}

/// One row as drawn into a [`RowBuffer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// Index into the filtered sequence.
    pub index: usize,
    /// Top offset in pixels.
    pub top: f64,
    /// Row style class.
    pub class: &'static str,
    /// Cell texts.
    pub cells: Vec<String>,
}

/// Headless render target that records what was drawn.
#[derive(Debug, Clone, Default)]
pub struct RowBuffer {
    viewport_height: f64,
    content_height: f64,
    rows: Vec<RenderedRow>,
    redraws: usize,
}

impl RowBuffer {
    /// Buffer reporting a viewport `viewport_height` pixels tall.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            ..Self::default()
        }
    }

    /// Change the reported viewport height, e.g. when a tab is shown.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    /// Rows from the last redraw.
    #[must_use]
    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    /// Last content height set by the engine.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Number of full teardown/redraw cycles so far.
    #[must_use]
    pub fn redraws(&self) -> usize {
        self.redraws
    }
}

impl<R: TableRow> RenderTarget<R> for RowBuffer {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
        self.redraws += 1;
    }

    fn set_content_height(&mut self, height: f64) {
        self.content_height = height;
    }

    fn draw_row(&mut self, index: usize, top: f64, record: &R) {
        self.rows.push(RenderedRow {
            index,
            top,
            class: record.row_class(),
            cells: record.cells(),
        });
    }
}
