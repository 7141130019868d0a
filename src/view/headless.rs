//! A recording [`MolecularView`] with no graphics.

use super::{AtomSite, ModelHandle, MolecularView, Selection, StyleSpec};
use crate::error::ViewerError;
use crate::structure::parse_atoms;

/// One call made against a [`HeadlessView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    /// A model was added.
    AddModel(ModelHandle),
    /// All models were removed.
    RemoveAllModels,
    /// All shapes were removed.
    RemoveAllShapes,
    /// A style replaced the selection's style.
    SetStyle(Selection, StyleSpec),
    /// A style was layered onto the selection.
    AddStyle(Selection, StyleSpec),
    /// Click reporting toggled.
    SetClickable(bool),
    /// Camera recentered.
    ZoomTo(Selection),
    /// Container re-measured.
    Resize,
    /// Scene redrawn.
    Render,
}

/// Widget stand-in that parses models with the crate's own column parser
/// and logs every call.
#[derive(Debug, Default)]
pub struct HeadlessView {
    models: Vec<(ModelHandle, Vec<AtomSite>)>,
    next_handle: u64,
    clickable: bool,
    calls: Vec<ViewCall>,
}

impl HeadlessView {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    /// Forget the call log.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of redraws so far.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ViewCall::Render))
            .count()
    }

    /// Number of models in the scene.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Whether atom clicks are reported.
    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    /// Most recent whole-scene style, if any.
    #[must_use]
    pub fn last_style(&self) -> Option<&StyleSpec> {
        self.calls.iter().rev().find_map(|c| match c {
            ViewCall::SetStyle(sel, style) if *sel == Selection::all() => {
                Some(style)
            }
            _ => None,
        })
    }
}

impl MolecularView for HeadlessView {
    fn add_model(&mut self, text: &str) -> Result<ModelHandle, ViewerError> {
        let sites: Vec<AtomSite> = parse_atoms(text)
            .into_iter()
            .map(|a| AtomSite {
                chain: a.chain_id,
                resi: a.res_seq,
                resn: a.res_name,
            })
            .collect();
        if sites.is_empty() {
            return Err(ViewerError::Model("no atoms found".into()));
        }
        let handle = ModelHandle(self.next_handle);
        self.next_handle += 1;
        self.models.push((handle, sites));
        self.calls.push(ViewCall::AddModel(handle));
        Ok(handle)
    }

    fn remove_all_models(&mut self) {
        self.models.clear();
        self.calls.push(ViewCall::RemoveAllModels);
    }

    fn remove_all_shapes(&mut self) {
        self.calls.push(ViewCall::RemoveAllShapes);
    }

    fn set_style(&mut self, selection: &Selection, style: &StyleSpec) {
        self.calls
            .push(ViewCall::SetStyle(selection.clone(), style.clone()));
    }

    fn add_style(&mut self, selection: &Selection, style: &StyleSpec) {
        self.calls
            .push(ViewCall::AddStyle(selection.clone(), style.clone()));
    }

    fn set_clickable(&mut self, enabled: bool) {
        self.clickable = enabled;
        self.calls.push(ViewCall::SetClickable(enabled));
    }

    fn zoom_to(&mut self, selection: &Selection) {
        self.calls.push(ViewCall::ZoomTo(selection.clone()));
    }

    fn resize(&mut self) {
        self.calls.push(ViewCall::Resize);
    }

    fn render(&mut self) {
        self.calls.push(ViewCall::Render);
    }

    fn atoms(&self, model: ModelHandle) -> Vec<AtomSite> {
        self.models
            .iter()
            .find(|(handle, _)| *handle == model)
            .map(|(_, sites)| sites.clone())
            .unwrap_or_default()
    }
}
