use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How scroll events are turned into window recomputes.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ScrollScheduling {
    /// Recompute immediately, then drop scroll events for the throttle
    /// interval.
    Throttle,
    /// Mark dirty and recompute once on the next display frame.
    #[default]
    Frame,
}

/// Geometry and scheduling for one windowed list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
pub struct ListOptions {
    /// Fixed row height in pixels.
    #[schemars(title = "Row Height", range(min = 1.0, max = 400.0))]
    pub row_height: f64,
    /// Rows rendered beyond each edge of the viewport.
    #[schemars(title = "Buffer Rows", range(max = 200))]
    pub buffer_rows: usize,
    /// Scroll handling strategy.
    #[schemars(title = "Scroll Scheduling")]
    pub scheduling: ScrollScheduling,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tables", inline)]
#[serde(default)]
/// Settings for the literature list, raw-line grid and atom table.
pub struct TableOptions {
    /// Literature list.
    pub literature: ListOptions,
    /// Raw structure-file lines.
    pub raw_lines: ListOptions,
    /// Parsed atom records.
    pub atoms: ListOptions,
    /// Viewport height used when a list keeps reporting zero height.
    #[schemars(title = "Fallback Height", range(min = 1.0))]
    pub fallback_viewport_height: f64,
    /// Lines parsed per scheduling slice.
    #[schemars(title = "Parse Slice", range(min = 1))]
    pub parse_slice_lines: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            literature: ListOptions {
                row_height: 120.0,
                buffer_rows: 3,
                scheduling: ScrollScheduling::Throttle,
            },
            raw_lines: ListOptions {
                row_height: 24.0,
                buffer_rows: 10,
                scheduling: ScrollScheduling::Frame,
            },
            atoms: ListOptions {
                row_height: 22.0,
                buffer_rows: 20,
                scheduling: ScrollScheduling::Frame,
            },
            fallback_viewport_height: 300.0,
            parse_slice_lines: 5_000,
        }
    }
}
