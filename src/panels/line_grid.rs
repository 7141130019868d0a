use std::collections::BTreeSet;

use super::{thousands, TableZoom};
use crate::list::{ListConfig, TableRow, WindowedList};
use crate::structure::{raw_lines, PdbId, RawLineRecord};

impl TableRow for RawLineRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.line_number.to_string(),
            self.record_type.clone(),
            self.content.clone(),
        ]
    }

    fn row_class(&self) -> &'static str {
        self.class().css_class()
    }
}

/// Where the displayed text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    None,
    Entry(PdbId),
    Upload,
}

/// Windowed grid of raw structure-file lines with a record-type filter.
#[derive(Debug)]
pub struct LineGrid {
    list: WindowedList<RawLineRecord>,
    source: Source,
    record_types: Vec<String>,
    filter: Option<String>,
    zoom: TableZoom,
}

impl LineGrid {
    /// Empty grid.
    #[must_use]
    pub fn new(config: ListConfig) -> Self {
        Self {
            list: WindowedList::new(config),
            source: Source::None,
            record_types: Vec::new(),
            filter: None,
            zoom: TableZoom::default(),
        }
    }

    /// Show the lines of `text`; `id` is `None` for uploads.
    pub fn load(&mut self, text: &str, id: Option<PdbId>) {
        let lines = raw_lines(text);
        let types: BTreeSet<&str> = lines
            .iter()
            .map(|l| l.record_type.as_str())
            .filter(|t| !t.is_empty())
            .collect();
        self.record_types = types.into_iter().map(str::to_owned).collect();
        self.source = id.map_or(Source::Upload, Source::Entry);
        self.filter = None;
        self.list.set_sequence(lines);
    }

    /// Show only lines whose record type is `record_type`; `None` shows
    /// all.
    pub fn filter(&mut self, record_type: Option<&str>) {
        self.filter = record_type.map(str::to_owned);
        self.list.apply_filter(|line| {
            record_type.is_none_or(|wanted| line.record_type == wanted)
        });
    }

    /// Back to the "no structure" state.
    pub fn clear(&mut self) {
        self.list.clear();
        self.source = Source::None;
        self.record_types.clear();
        self.filter = None;
    }

    /// Distinct non-empty record types, sorted, for the filter menu.
    #[must_use]
    pub fn record_types(&self) -> &[String] {
        &self.record_types
    }

    /// Active record-type filter.
    #[must_use]
    pub fn active_filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Heading text.
    #[must_use]
    pub fn title(&self) -> String {
        match self.source {
            Source::None => "Raw PDB Data".to_owned(),
            Source::Entry(id) => format!("Raw PDB Data - {id}"),
            Source::Upload => "Raw PDB Data - Uploaded File".to_owned(),
        }
    }

    /// Sub-heading text.
    #[must_use]
    pub fn info(&self) -> String {
        match self.source {
            Source::None => {
                "Load a structure to view formatted PDB data".to_owned()
            }
            Source::Entry(_) | Source::Upload => format!(
                "{} lines of PDB data",
                thousands(self.list.full().len())
            ),
        }
    }

    /// Filter summary, e.g. `Showing 12 of 340 records`.
    #[must_use]
    pub fn stats(&self) -> String {
        format!(
            "Showing {} of {} records",
            thousands(self.list.filtered_len()),
            thousands(self.list.full().len())
        )
    }

    /// Visual zoom of the grid.
    #[must_use]
    pub fn zoom(&self) -> TableZoom {
        self.zoom
    }

    /// Visual zoom of the grid, for the zoom buttons.
    pub fn zoom_mut(&mut self) -> &mut TableZoom {
        &mut self.zoom
    }

    /// The underlying list.
    #[must_use]
    pub fn list(&self) -> &WindowedList<RawLineRecord> {
        &self.list
    }

    /// The underlying list, for scroll and render calls.
    pub fn list_mut(&mut self) -> &mut WindowedList<RawLineRecord> {
        &mut self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{TableOptions, TimingOptions};

    const TEXT: &str = "HEADER    PLANT PROTEIN\n\
                        REMARK   1\n\
                        \n\
                        ATOM      1  N   THR A   1      17.047  14.099   3.625  1.00 13.79           N\n\
                        HETATM    2  O   HOH A 101       1.000   2.000   3.000  1.00  0.00           O\n\
                        END\n";

    fn grid() -> LineGrid {
        let tables = TableOptions::default();
        LineGrid::new(ListConfig::from_options(
            &tables.raw_lines,
            &TimingOptions::default(),
            tables.fallback_viewport_height,
        ))
    }

    #[test]
    fn load_builds_sorted_record_types() {
        let mut grid = grid();
        grid.load(TEXT, Some(PdbId::parse("1CRN").unwrap()));
        assert_eq!(
            grid.record_types(),
            ["ATOM", "END", "HEADER", "HETATM", "REMARK"]
        );
        assert_eq!(grid.title(), "Raw PDB Data - 1CRN");
        assert_eq!(grid.info(), "5 lines of PDB data");
        assert_eq!(grid.stats(), "Showing 5 of 5 records");
    }

    #[test]
    fn filter_by_record_type() {
        let mut grid = grid();
        grid.load(TEXT, None);
        assert_eq!(grid.title(), "Raw PDB Data - Uploaded File");
        grid.filter(Some("HETATM"));
        assert_eq!(grid.stats(), "Showing 1 of 5 records");
        let row = grid.list().filtered_get(0).unwrap();
        assert_eq!(row.line_number, 5);
        assert_eq!(row.row_class(), "record-hetatm");
        grid.filter(None);
        assert_eq!(grid.list().filtered_len(), 5);
        assert_eq!(grid.active_filter(), None);
    }

    #[test]
    fn clear_resets_texts() {
        let mut grid = grid();
        grid.load(TEXT, None);
        grid.clear();
        assert_eq!(grid.title(), "Raw PDB Data");
        assert!(grid.record_types().is_empty());
        assert_eq!(grid.list().full().len(), 0);
    }
}
