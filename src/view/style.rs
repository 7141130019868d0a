//! Style objects handed to the 3D widget.
//!
//! A [`StyleSpec`] maps a representation kind (cartoon, stick, ...) to its
//! color/radius parameters and serializes to the widget's JSON shape, e.g.
//! `{"cartoon": {"colorscheme": "spectrum"}}`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Molecular representation.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    /// Secondary-structure cartoon.
    #[default]
    Cartoon,
    /// Bonds as sticks.
    Stick,
    /// Van der Waals spheres.
    Sphere,
    /// Wire lines.
    Line,
    /// Atom crosses.
    Cross,
}

/// Coloring applied to a representation.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Rainbow along the chain.
    #[default]
    Spectrum,
    /// One color per chain.
    Chain,
    /// By residue type.
    Residue,
    /// By element.
    Element,
    /// Solid white.
    White,
    /// Solid red.
    Red,
    /// Solid blue.
    Blue,
    /// Solid green.
    Green,
}

impl ColorScheme {
    /// Widget name of the scheme or color.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spectrum => "spectrum",
            Self::Chain => "chain",
            Self::Residue => "residue",
            Self::Element => "element",
            Self::White => "white",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }

    /// Whether this is a computed scheme rather than a solid color.
    #[must_use]
    pub fn is_scheme(self) -> bool {
        matches!(
            self,
            Self::Spectrum | Self::Chain | Self::Residue | Self::Element
        )
    }
}

/// Parameters of one representation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StyleParams {
    /// Solid color name or hex string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Computed coloring scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscheme: Option<String>,
    /// Stick or sphere radius in Ångström.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Opacity in `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

/// Mapping from representation kind to its parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct StyleSpec(pub BTreeMap<StyleKind, StyleParams>);

/// Color of the residue highlight applied on atom click.
const HIGHLIGHT_COLOR: &str = "#ffff00";

impl StyleSpec {
    /// The empty style (hides everything it is applied to).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whole-model style: one representation colored by `color`.
    #[must_use]
    pub fn base(kind: StyleKind, color: ColorScheme) -> Self {
        let params = if color.is_scheme() {
            StyleParams {
                colorscheme: Some(color.as_str().to_owned()),
                ..StyleParams::default()
            }
        } else {
            StyleParams {
                color: Some(color.as_str().to_owned()),
                ..StyleParams::default()
            }
        };
        Self(BTreeMap::from([(kind, params)]))
    }

    /// Glowing yellow sticks and translucent spheres for a selected residue.
    #[must_use]
    pub fn residue_highlight() -> Self {
        Self(BTreeMap::from([
            (
                StyleKind::Stick,
                StyleParams {
                    color: Some(HIGHLIGHT_COLOR.to_owned()),
                    radius: Some(0.4),
                    ..StyleParams::default()
                },
            ),
            (
                StyleKind::Sphere,
                StyleParams {
                    color: Some(HIGHLIGHT_COLOR.to_owned()),
                    radius: Some(0.6),
                    alpha: Some(0.8),
                    ..StyleParams::default()
                },
            ),
        ]))
    }

    /// Parameters for `kind`, if present.
    #[must_use]
    pub fn get(&self, kind: StyleKind) -> Option<&StyleParams> {
        self.0.get(&kind)
    }

    /// Serialize to the widget's JSON form.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Atom selector; unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Chain identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    /// Residue sequence number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resi: Option<i32>,
}

impl Selection {
    /// Selector matching every atom.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Selector for one residue of one chain.
    #[must_use]
    pub fn residue(chain: impl Into<String>, resi: i32) -> Self {
        Self {
            chain: Some(chain.into()),
            resi: Some(resi),
        }
    }

    /// Whether an atom at (`chain`, `resi`) is selected.
    #[must_use]
    pub fn matches(&self, chain: &str, resi: i32) -> bool {
        self.chain.as_deref().is_none_or(|c| c == chain)
            && self.resi.is_none_or(|r| r == resi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_and_solid_colors_use_different_keys() {
        let spectrum = StyleSpec::base(StyleKind::Cartoon, ColorScheme::Spectrum);
        assert_eq!(
            spectrum.to_json(),
            serde_json::json!({"cartoon": {"colorscheme": "spectrum"}})
        );
        let white = StyleSpec::base(StyleKind::Stick, ColorScheme::White);
        assert_eq!(white.to_json(), serde_json::json!({"stick": {"color": "white"}}));
    }

    #[test]
    fn highlight_matches_widget_shape() {
        let json = StyleSpec::residue_highlight().to_json();
        assert_eq!(json["stick"]["radius"], serde_json::json!(0.4));
        assert_eq!(json["sphere"]["color"], "#ffff00");
        assert_eq!(json["sphere"]["radius"], serde_json::json!(0.6));
        assert_eq!(json["sphere"]["alpha"], serde_json::json!(0.8));
        assert_eq!(
            serde_json::to_string(&json["stick"]).unwrap(),
            r##"{"color":"#ffff00","radius":0.4}"##
        );
    }

    #[test]
    fn selection_matching() {
        let sel = Selection::residue("A", 42);
        assert!(sel.matches("A", 42));
        assert!(!sel.matches("B", 42));
        assert!(Selection::all().matches("Z", -1));
        assert_eq!(serde_json::to_string(&Selection::all()).unwrap(), "{}");
    }
}
