//! The 3D widget contract.
//!
//! The viewer never draws molecules itself. It hands structure text to a
//! [`MolecularView`], styles atom selections with [`StyleSpec`] objects and
//! asks for redraws. [`HeadlessView`] records those calls for tests and
//! headless hosts.

mod headless;
mod style;

use std::collections::BTreeSet;
use std::fmt;

pub use headless::{HeadlessView, ViewCall};
pub use style::{ColorScheme, Selection, StyleKind, StyleParams, StyleSpec};

use crate::error::ViewerError;

/// Opaque handle to a model added to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u64);

/// Per-atom summary the widget reports for a model or a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomSite {
    /// Chain identifier.
    pub chain: String,
    /// Residue sequence number.
    pub resi: i32,
    /// Residue name.
    pub resn: String,
}

/// Operations the viewer needs from a 3D molecular widget.
pub trait MolecularView {
    /// Parse `text` as a PDB model and add it to the scene.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Model`] when the widget cannot parse `text`.
    fn add_model(&mut self, text: &str) -> Result<ModelHandle, ViewerError>;

    /// Remove every model.
    fn remove_all_models(&mut self);

    /// Remove every non-model shape.
    fn remove_all_shapes(&mut self);

    /// Replace the style of atoms matching `selection`.
    fn set_style(&mut self, selection: &Selection, style: &StyleSpec);

    /// Layer `style` over the current style of `selection`.
    fn add_style(&mut self, selection: &Selection, style: &StyleSpec);

    /// Turn atom-click reporting on or off.
    fn set_clickable(&mut self, enabled: bool);

    /// Recenter the camera on `selection`.
    fn zoom_to(&mut self, selection: &Selection);

    /// Re-read the widget's container size.
    fn resize(&mut self);

    /// Redraw the scene.
    fn render(&mut self);

    /// Atoms of `model`, in file order.
    fn atoms(&self, model: ModelHandle) -> Vec<AtomSite>;
}

/// Size summary of a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MolecularStats {
    /// Atom count.
    pub atoms: usize,
    /// Distinct chain identifiers.
    pub chains: usize,
    /// Distinct (chain, residue number) pairs.
    pub residues: usize,
}

impl MolecularStats {
    /// Count atoms, chains and residues of `sites`.
    #[must_use]
    pub fn from_sites(sites: &[AtomSite]) -> Self {
        let chains: BTreeSet<&str> =
            sites.iter().map(|s| s.chain.as_str()).collect();
        let residues: BTreeSet<(&str, i32)> =
            sites.iter().map(|s| (s.chain.as_str(), s.resi)).collect();
        Self {
            atoms: sites.len(),
            chains: chains.len(),
            residues: residues.len(),
        }
    }
}

impl fmt::Display for MolecularStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atoms: {} | Chains: {} | Residues: {}",
            self.atoms, self.chains, self.residues
        )
    }
}
