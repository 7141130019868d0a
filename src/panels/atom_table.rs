use std::collections::BTreeSet;
use std::sync::Arc;

use super::{thousands, TableZoom};
use crate::list::{ListConfig, TableRow, WindowedList};
use crate::structure::{AtomKind, AtomRecord, ParseJob, ParseProgress};

impl TableRow for AtomRecord {
    fn cells(&self) -> Vec<String> {
        let chain = if self.chain_id.is_empty() {
            "-".to_owned()
        } else {
            self.chain_id.clone()
        };
        vec![
            self.serial.to_string(),
            self.record_type.to_string(),
            self.atom_name.clone(),
            self.res_name.clone(),
            chain,
            self.res_seq.to_string(),
            format!("{:.3}", self.x),
            format!("{:.3}", self.y),
            format!("{:.3}", self.z),
            format!("{:.2}", self.occupancy),
            format!("{:.2}", self.temp_factor),
            self.element.clone(),
        ]
    }

    fn row_class(&self) -> &'static str {
        match self.record_type {
            AtomKind::Atom => "atom-type",
            AtomKind::Hetatm => "hetatm-type",
        }
    }
}

/// Conjunction of the three atom-table filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomFilter {
    /// Keep only this record type.
    pub record_type: Option<AtomKind>,
    /// Keep only this chain.
    pub chain: Option<String>,
    /// Keep only this element.
    pub element: Option<String>,
}

impl AtomFilter {
    /// Whether `atom` passes every active predicate.
    #[must_use]
    pub fn matches(&self, atom: &AtomRecord) -> bool {
        self.record_type.is_none_or(|kind| atom.record_type == kind)
            && self.chain.as_deref().is_none_or(|c| atom.chain_id == c)
            && self.element.as_deref().is_none_or(|e| atom.element == e)
    }

    /// Whether no predicate is active.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.record_type.is_none()
            && self.chain.is_none()
            && self.element.is_none()
    }
}

/// Choices offered by the chain and element filter menus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Distinct non-empty chain ids, ascending.
    pub chains: Vec<String>,
    /// Distinct non-empty element symbols, ascending.
    pub elements: Vec<String>,
}

impl FilterOptions {
    /// Collect the menu choices of `atoms`.
    #[must_use]
    pub fn from_atoms(atoms: &[AtomRecord]) -> Self {
        let mut chains = BTreeSet::new();
        let mut elements = BTreeSet::new();
        for atom in atoms {
            if !atom.chain_id.is_empty() {
                let _ = chains.insert(atom.chain_id.as_str());
            }
            if !atom.element.is_empty() {
                let _ = elements.insert(atom.element.as_str());
            }
        }
        Self {
            chains: chains.into_iter().map(str::to_owned).collect(),
            elements: elements.into_iter().map(str::to_owned).collect(),
        }
    }
}

/// Windowed table of parsed ATOM/HETATM records.
///
/// Records arrive through a [`ParseJob`] stepped in slices from the host
/// loop. While a job is in flight a second parse of the same load is
/// refused; a parse for a newer load replaces it.
#[derive(Debug)]
pub struct AtomTable {
    list: WindowedList<AtomRecord>,
    filter: AtomFilter,
    options: FilterOptions,
    job: Option<ParseJob>,
    generation: u64,
    atom_count: usize,
    hetatm_count: usize,
    zoom: TableZoom,
}

impl AtomTable {
    /// Empty table.
    #[must_use]
    pub fn new(config: ListConfig) -> Self {
        Self {
            list: WindowedList::new(config),
            filter: AtomFilter::default(),
            options: FilterOptions::default(),
            job: None,
            generation: 0,
            atom_count: 0,
            hetatm_count: 0,
            zoom: TableZoom::default(),
        }
    }

    /// Start parsing `text` for load `generation`.
    ///
    /// Returns `false` when a parse for the same generation is already
    /// running.
    pub fn begin_parse(&mut self, text: Arc<str>, generation: u64) -> bool {
        if self.job.as_ref().is_some_and(|j| j.generation() == generation) {
            log::debug!("atom parse for load {generation} already running");
            return false;
        }
        if let Some(stale) = self.job.take() {
            log::debug!("discarding atom parse for load {}", stale.generation());
        }
        self.reset_records();
        self.generation = generation;
        self.job = Some(ParseJob::new(text, generation));
        true
    }

    /// Advance the running parse by up to `max_lines` lines.
    ///
    /// Installs the records once the job completes. Returns `None` when
    /// no parse is running.
    pub fn step_parse(&mut self, max_lines: usize) -> Option<ParseProgress> {
        let job = self.job.as_mut()?;
        let progress = job.step(max_lines);
        if progress == ParseProgress::Done {
            let atoms = job.take_if_done().unwrap_or_default();
            self.job = None;
            self.install(atoms);
        }
        Some(progress)
    }

    /// Parse `text` to completion in one call.
    pub fn load_text(&mut self, text: Arc<str>, generation: u64) {
        if self.begin_parse(text, generation) {
            while self
                .step_parse(usize::MAX)
                .is_some_and(|p| p != ParseProgress::Done)
            {}
        }
    }

    fn install(&mut self, atoms: Vec<AtomRecord>) {
        self.options = FilterOptions::from_atoms(&atoms);
        self.atom_count = atoms
            .iter()
            .filter(|a| a.record_type == AtomKind::Atom)
            .count();
        self.hetatm_count = atoms.len() - self.atom_count;
        self.filter = AtomFilter::default();
        log::info!(
            "atom table holds {} records ({} ATOM, {} HETATM)",
            atoms.len(),
            self.atom_count,
            self.hetatm_count
        );
        self.list.set_sequence(atoms);
    }

    fn reset_records(&mut self) {
        self.list.clear();
        self.filter = AtomFilter::default();
        self.options = FilterOptions::default();
        self.atom_count = 0;
        self.hetatm_count = 0;
    }

    /// Replace the active filter, re-scanning every record.
    pub fn set_filter(&mut self, filter: AtomFilter) {
        self.filter = filter;
        self.refilter();
    }

    /// Set the record-type menu, keeping the chain and element choices.
    pub fn set_record_type_filter(&mut self, record_type: Option<AtomKind>) {
        self.filter.record_type = record_type;
        self.refilter();
    }

    /// Set the chain menu, keeping the record-type and element choices.
    pub fn set_chain_filter(&mut self, chain: Option<String>) {
        self.filter.chain = chain;
        self.refilter();
    }

    /// Set the element menu, keeping the record-type and chain choices.
    pub fn set_element_filter(&mut self, element: Option<String>) {
        self.filter.element = element;
        self.refilter();
    }

    fn refilter(&mut self) {
        let active = &self.filter;
        self.list.apply_filter(|atom| active.matches(atom));
    }

    /// Active filter.
    #[must_use]
    pub fn filter(&self) -> &AtomFilter {
        &self.filter
    }

    /// Chain and element menu choices for the current load.
    #[must_use]
    pub fn filter_options(&self) -> &FilterOptions {
        &self.options
    }

    /// Whether a parse is in flight.
    #[must_use]
    pub fn is_parsing(&self) -> bool {
        self.job.is_some()
    }

    /// Load generation of the installed or running parse.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the records and any running parse.
    pub fn clear(&mut self) {
        self.job = None;
        self.reset_records();
    }

    /// Count summary under the table.
    #[must_use]
    pub fn stats_text(&self) -> String {
        let total = self.list.full().len();
        let kinds = format!(
            "{} ATOM, {} HETATM",
            thousands(self.atom_count),
            thousands(self.hetatm_count)
        );
        let shown = self.list.filtered_len();
        if shown == total {
            format!("{} atoms ({kinds})", thousands(total))
        } else {
            format!(
                "Showing {} of {} atoms ({kinds})",
                thousands(shown),
                thousands(total)
            )
        }
    }

    /// Heading text.
    #[must_use]
    pub fn title(&self) -> String {
        let total = self.list.full().len();
        if total == 0 {
            "Atom Data".to_owned()
        } else {
            format!("Atom Data - {} atoms", thousands(total))
        }
    }

    /// Sub-heading text.
    #[must_use]
    pub fn info(&self) -> String {
        if self.list.full().is_empty() {
            "Load a structure to view atomic coordinates and properties"
                .to_owned()
        } else {
            format!(
                "{} ATOM records, {} HETATM records",
                thousands(self.atom_count),
                thousands(self.hetatm_count)
            )
        }
    }

    /// Visual zoom of the table.
    #[must_use]
    pub fn zoom(&self) -> TableZoom {
        self.zoom
    }

    /// Visual zoom of the table, for the zoom buttons.
    pub fn zoom_mut(&mut self) -> &mut TableZoom {
        &mut self.zoom
    }

    /// The underlying list.
    #[must_use]
    pub fn list(&self) -> &WindowedList<AtomRecord> {
        &self.list
    }

    /// The underlying list, for scroll and render calls.
    pub fn list_mut(&mut self) -> &mut WindowedList<AtomRecord> {
        &mut self.list
    }
}
