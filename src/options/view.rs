use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::view::{ColorScheme, StyleKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "View", inline)]
#[serde(default)]
/// Initial 3D style and view-level thresholds.
pub struct ViewOptions {
    /// Representation applied to a freshly loaded model.
    #[schemars(title = "Style")]
    pub style: StyleKind,
    /// Coloring applied with the style.
    #[schemars(title = "Color")]
    pub color: ColorScheme,
    /// Atom count above which a large-molecule warning is shown.
    #[schemars(title = "Large Molecule Atoms")]
    pub large_molecule_atoms: usize,
    /// Frames per second below which a low render rate is logged.
    #[schemars(title = "Low FPS Warning", range(min = 1.0, max = 240.0))]
    pub low_fps_warning: f32,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            style: StyleKind::Cartoon,
            color: ColorScheme::Spectrum,
            large_molecule_atoms: 50_000,
            low_fps_warning: 20.0,
        }
    }
}
