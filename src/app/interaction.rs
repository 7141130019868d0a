//! Style, selection and view commands for [`App`].

use web_time::Instant;

use super::{App, SelectedResidue, StatusLevel};
use crate::panels::AtomFilter;
use crate::service::{Citation, StructureService};
use crate::structure::AtomKind;
use crate::view::{
    AtomSite, ColorScheme, MolecularView, Selection, StyleKind, StyleSpec,
};

impl<S: StructureService, V: MolecularView> App<S, V> {
    /// Change the representation of the whole model.
    pub fn set_style(&mut self, style: StyleKind, now: Instant) {
        self.style = style;
        self.request_style_update(now);
    }

    /// Change the coloring of the whole model.
    pub fn set_color(&mut self, color: ColorScheme, now: Instant) {
        self.color = color;
        self.request_style_update(now);
    }

    /// Current representation.
    #[must_use]
    pub fn style(&self) -> StyleKind {
        self.style
    }

    /// Current coloring.
    #[must_use]
    pub fn color(&self) -> ColorScheme {
        self.color
    }

    /// Restyle now if the throttle allows it, otherwise on a later tick.
    fn request_style_update(&mut self, now: Instant) {
        if self.style_gate.try_acquire(now) {
            self.apply_style(now);
        } else {
            self.style_dirty = true;
        }
    }

    /// Push the current style and highlight to the widget.
    pub(super) fn apply_style(&mut self, now: Instant) {
        self.style_dirty = false;
        if self.loaded.is_none() {
            return;
        }
        let base = StyleSpec::base(self.style, self.color);
        self.view.set_style(&Selection::all(), &base);
        if let Some(selected) = &self.selected {
            self.view.add_style(
                &Selection::residue(selected.chain.clone(), selected.resi),
                &StyleSpec::residue_highlight(),
            );
        }
        self.request_render(now);
    }

    /// Turn residue picking on or off.
    pub fn set_interactive(&mut self, enabled: bool, now: Instant) {
        self.interactive = enabled;
        self.view.set_clickable(enabled);
        if enabled {
            self.set_status(
                StatusLevel::Info,
                "Interactive mode enabled - click on amino acids to explore",
            );
        } else {
            self.set_status(StatusLevel::Info, "Interactive mode disabled");
            if self.selected.take().is_some() {
                self.request_style_update(now);
            }
        }
    }

    /// Whether residue picking is on.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Highlight the residue of a clicked atom.
    ///
    /// Ignored unless interactive mode is on and a model is shown.
    pub fn on_atom_click(&mut self, site: &AtomSite, now: Instant) {
        if !self.interactive || self.loaded.is_none() {
            return;
        }
        let selected = SelectedResidue {
            chain: site.chain.clone(),
            resi: site.resi,
            resn: site.resn.clone(),
        };
        self.set_status(
            StatusLevel::Info,
            format!(
                "Selected: {} {} in chain {}",
                selected.resn, selected.resi, selected.chain
            ),
        );
        self.selected = Some(selected);
        // Clicks are not throttled.
        self.apply_style(now);
    }

    /// Remove the residue highlight.
    pub fn clear_selection(&mut self, now: Instant) {
        if self.selected.take().is_some() {
            self.request_style_update(now);
        }
    }

    /// Highlighted residue, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&SelectedResidue> {
        self.selected.as_ref()
    }

    /// Recenter the camera on the whole model.
    pub fn center_view(&mut self, now: Instant) {
        self.view.zoom_to(&Selection::all());
        self.request_render(now);
        self.set_status(StatusLevel::Info, "View centered");
    }

    /// Notify the widget that its container changed size.
    pub fn resize_view(&mut self, now: Instant) {
        self.view.resize();
        self.request_render(now);
    }

    /// Remove the structure and empty every panel.
    pub fn clear_viewer(&mut self, now: Instant) {
        self.render_frame.cancel();
        self.reset_derived();
        self.generation += 1;
        self.request_render(now);
        self.set_status(StatusLevel::Info, "Display cleared");
    }

    /// Drop every cached response and reset the render-rate window.
    pub fn cleanup(&mut self) {
        self.caches.clear_all();
        self.monitor.reset();
        log::info!("caches cleared");
    }

    /// Replace all three atom-table filters at once.
    pub fn set_atom_filter(&mut self, filter: AtomFilter) {
        self.atoms.set_filter(filter);
    }

    /// Atom-table record-type menu; `None` is "all".
    pub fn set_atom_record_type_filter(
        &mut self,
        record_type: Option<AtomKind>,
    ) {
        self.atoms.set_record_type_filter(record_type);
    }

    /// Atom-table chain menu; `None` is "all".
    pub fn set_atom_chain_filter(&mut self, chain: Option<String>) {
        self.atoms.set_chain_filter(chain);
    }

    /// Atom-table element menu; `None` is "all".
    pub fn set_atom_element_filter(&mut self, element: Option<String>) {
        self.atoms.set_element_filter(element);
    }

    /// Filter the raw-line grid by record type; `None` shows every line.
    pub fn filter_lines(&mut self, record_type: Option<&str>) {
        self.lines.filter(record_type);
    }

    /// Full record of the paper at list position `index`, for the detail
    /// view.
    #[must_use]
    pub fn paper(&self, index: usize) -> Option<&Citation> {
        self.literature.paper(index)
    }
}
