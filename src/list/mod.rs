//! Windowed (virtualized) rendering of long, filterable row sequences.
//!
//! [`WindowedList`] owns the records, the filtered index sequence and the
//! scroll state; [`VisibleWindow`] is the pure index math; a
//! [`RenderTarget`] receives the rows to draw.

mod engine;
mod target;
mod window;

pub use engine::{ListConfig, WindowedList};
pub use target::{RenderTarget, RenderedRow, RowBuffer, TableRow};
pub use window::{content_height, max_scroll, row_top, VisibleWindow};
