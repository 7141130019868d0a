//! The three windowed panels: literature list, raw-line grid and atom
//! table. Each is a thin configuration of [`WindowedList`] plus its own
//! header texts and filters.
//!
//! [`WindowedList`]: crate::list::WindowedList

mod atom_table;
mod line_grid;
mod literature;

pub use atom_table::{AtomFilter, AtomTable, FilterOptions};
pub use line_grid::LineGrid;
pub use literature::{LiteraturePanel, LiteratureState};

/// Smallest zoom level in percent.
const ZOOM_MIN: u16 = 50;
/// Largest zoom level in percent.
const ZOOM_MAX: u16 = 200;
/// Zoom change per step in percent.
const ZOOM_STEP: u16 = 25;

/// Visual scale of a table, applied by the host as a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableZoom {
    percent: u16,
}

impl Default for TableZoom {
    fn default() -> Self {
        Self { percent: 100 }
    }
}

impl TableZoom {
    /// One step larger, up to 200%.
    pub fn zoom_in(&mut self) -> u16 {
        self.percent = (self.percent + ZOOM_STEP).min(ZOOM_MAX);
        self.percent
    }

    /// One step smaller, down to 50%.
    pub fn zoom_out(&mut self) -> u16 {
        self.percent = self.percent.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
        self.percent
    }

    /// Current level in percent.
    #[must_use]
    pub fn percent(self) -> u16 {
        self.percent
    }

    /// Current level as a scale factor.
    #[must_use]
    pub fn scale(self) -> f64 {
        f64::from(self.percent) / 100.0
    }

    /// Level label, e.g. `125%`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{}%", self.percent)
    }
}

/// Format `n` with comma thousands separators.
pub(crate) fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped_in_steps() {
        let mut zoom = TableZoom::default();
        assert_eq!(zoom.zoom_in(), 125);
        for _ in 0..10 {
            let _ = zoom.zoom_in();
        }
        assert_eq!(zoom.percent(), 200);
        for _ in 0..10 {
            let _ = zoom.zoom_out();
        }
        assert_eq!(zoom.percent(), 50);
        assert_eq!(zoom.scale(), 0.5);
        assert_eq!(zoom.label(), "50%");
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }
}
