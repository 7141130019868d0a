use crate::list::{ListConfig, TableRow, WindowedList};
use crate::service::Citation;
use crate::structure::PdbId;

impl TableRow for Citation {
    fn cells(&self) -> Vec<String> {
        vec![
            self.display_title().to_owned(),
            self.author_summary(),
            self.journal_line(),
            self.abstract_or_placeholder().to_owned(),
            self.doi_url().unwrap_or_default(),
            self.pubmed_url().unwrap_or_default(),
        ]
    }

    fn row_class(&self) -> &'static str {
        "paper-item"
    }
}

/// What the literature panel is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteratureState {
    /// No structure loaded, or an upload without an identifier.
    Empty,
    /// Citations for `id` are being fetched.
    Loading(PdbId),
    /// Citations for `id` are listed.
    Loaded(PdbId),
    /// No citations for `id`; `failed` when the lookup itself failed.
    NoResults {
        /// Structure the lookup was for.
        id: PdbId,
        /// Whether the lookup failed rather than returning nothing.
        failed: bool,
    },
}

/// Windowed list of publications related to the loaded structure.
#[derive(Debug)]
pub struct LiteraturePanel {
    list: WindowedList<Citation>,
    state: LiteratureState,
}

impl LiteraturePanel {
    /// Empty panel.
    #[must_use]
    pub fn new(config: ListConfig) -> Self {
        Self {
            list: WindowedList::new(config),
            state: LiteratureState::Empty,
        }
    }

    /// Back to the "no structure" state.
    pub fn clear(&mut self) {
        self.list.clear();
        self.state = LiteratureState::Empty;
    }

    /// Show the loading placeholder for `id`.
    pub fn begin_loading(&mut self, id: PdbId) {
        self.list.clear();
        self.state = LiteratureState::Loading(id);
    }

    /// List `citations` for `id`.
    pub fn show(&mut self, id: PdbId, citations: Vec<Citation>) {
        self.state = if citations.is_empty() {
            LiteratureState::NoResults { id, failed: false }
        } else {
            LiteratureState::Loaded(id)
        };
        self.list.set_sequence(citations);
    }

    /// Record that the lookup for `id` failed.
    pub fn show_failure(&mut self, id: PdbId) {
        self.list.clear();
        self.state = LiteratureState::NoResults { id, failed: true };
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &LiteratureState {
        &self.state
    }

    /// Heading text.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.state {
            LiteratureState::Empty => "Related Publications".to_owned(),
            LiteratureState::Loading(id)
            | LiteratureState::Loaded(id)
            | LiteratureState::NoResults { id, .. } => {
                format!("Related Publications for {id}")
            }
        }
    }

    /// Sub-heading text.
    #[must_use]
    pub fn info(&self) -> String {
        match &self.state {
            LiteratureState::Empty => {
                "Select a protein structure to view related research papers"
                    .to_owned()
            }
            LiteratureState::Loading(_) => "Loading publications...".to_owned(),
            LiteratureState::Loaded(id) => format!(
                "Found {} publication(s) related to {id}",
                self.list.full().len()
            ),
            LiteratureState::NoResults { id, .. } => {
                format!("No publications found for {id}")
            }
        }
    }

    /// Empty-state message shown instead of rows, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        match &self.state {
            LiteratureState::Empty => Some("No structure loaded"),
            LiteratureState::Loading(_) => {
                Some("Fetching literature from RCSB database...")
            }
            LiteratureState::Loaded(_) => None,
            LiteratureState::NoResults { failed: true, .. } => {
                Some("Failed to fetch publication data")
            }
            LiteratureState::NoResults { failed: false, .. } => {
                Some("No related publications found")
            }
        }
    }

    /// Full record of the paper at list position `index`.
    #[must_use]
    pub fn paper(&self, index: usize) -> Option<&Citation> {
        self.list.filtered_get(index)
    }

    /// The underlying list.
    #[must_use]
    pub fn list(&self) -> &WindowedList<Citation> {
        &self.list
    }

    /// The underlying list, for scroll and render calls.
    pub fn list_mut(&mut self) -> &mut WindowedList<Citation> {
        &mut self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{TableOptions, TimingOptions};

    fn panel() -> LiteraturePanel {
        let tables = TableOptions::default();
        LiteraturePanel::new(ListConfig::from_options(
            &tables.literature,
            &TimingOptions::default(),
            tables.fallback_viewport_height,
        ))
    }

    #[test]
    fn state_texts_follow_lifecycle() {
        let id = PdbId::parse("1crn").unwrap();
        let mut panel = panel();
        assert_eq!(panel.title(), "Related Publications");
        assert_eq!(panel.placeholder(), Some("No structure loaded"));

        panel.begin_loading(id);
        assert_eq!(panel.title(), "Related Publications for 1CRN");
        assert_eq!(panel.info(), "Loading publications...");

        panel.show(
            id,
            vec![Citation {
                title: Some("Water structure".into()),
                ..Citation::default()
            }],
        );
        assert_eq!(panel.info(), "Found 1 publication(s) related to 1CRN");
        assert_eq!(panel.placeholder(), None);
        assert_eq!(panel.paper(0).unwrap().display_title(), "Water structure");
        assert!(panel.paper(1).is_none());

        panel.show_failure(id);
        assert_eq!(panel.placeholder(), Some("Failed to fetch publication data"));
        assert_eq!(panel.info(), "No publications found for 1CRN");
        panel.show(id, Vec::new());
        assert_eq!(panel.placeholder(), Some("No related publications found"));
    }

    #[test]
    fn citation_row_cells() {
        let c = Citation {
            pubmed_id: Some(42),
            ..Citation::default()
        };
        let cells = c.cells();
        assert_eq!(cells[0], "Untitled");
        assert_eq!(cells[1], "Unknown authors");
        assert_eq!(cells[4], "");
        assert_eq!(cells[5], "https://pubmed.ncbi.nlm.nih.gov/42/");
        assert_eq!(c.row_class(), "paper-item");
    }
}
