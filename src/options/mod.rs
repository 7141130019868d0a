//! Centralized viewer options with TOML preset support.
//!
//! Cache lifetimes, scheduling intervals, table geometry, remote endpoints,
//! upload limits and the initial 3D style are consolidated here. Options
//! serialize to/from TOML so a deployment can ship presets next to the
//! binary.

mod cache;
mod service;
mod tables;
mod timing;
mod view;

use std::path::Path;

pub use cache::{CacheOptions, CachePolicy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use service::{ServiceOptions, UploadOptions};
pub use tables::{ListOptions, ScrollScheduling, TableOptions};
pub use timing::TimingOptions;
pub use view::ViewOptions;

use crate::error::ViewerError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[timing]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Remote-data cache lifetimes and capacity thresholds.
    pub cache: CacheOptions,
    /// Debounce, throttle and auto-dismiss intervals.
    pub timing: TimingOptions,
    /// Windowed table geometry and scroll scheduling.
    pub tables: TableOptions,
    /// Remote service endpoints.
    #[schemars(skip)]
    pub service: ServiceOptions,
    /// Upload limits.
    pub upload: UploadOptions,
    /// Initial style and view thresholds.
    pub view: ViewOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Io`] if the file cannot be read and
    /// [`ViewerError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(ViewerError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] on malformed TOML or mistyped
    /// fields.
    pub fn from_toml(content: &str) -> Result<Self, ViewerError> {
        toml::from_str(content)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] if serialization fails and
    /// [`ViewerError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ViewerError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ViewerError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ViewerError::Io)?;
        }
        std::fs::write(path, content).map_err(ViewerError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .into_iter()
            .flatten()
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| {
                path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
            })
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ColorScheme, StyleKind};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[timing]
load_debounce_ms = 500

[view]
color = "chain"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.timing.load_debounce_ms, 500);
        assert_eq!(opts.view.color, ColorScheme::Chain);
        // Everything else should be default
        assert_eq!(opts.timing.validation_debounce_ms, 800);
        assert_eq!(opts.view.style, StyleKind::Cartoon);
        assert_eq!(opts.tables.atoms.buffer_rows, 20);
        assert_eq!(opts.cache.structures.max_age_secs, 1800);
    }

    #[test]
    fn bad_toml_is_an_options_error() {
        let err = Options::from_toml("[timing]\nload_debounce_ms = \"soon\"")
            .unwrap_err();
        assert!(matches!(err, ViewerError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("molview-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.upload.max_bytes = 1024;
        opts.save(&dir.join("small.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("small.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["small".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("cache"));
        assert!(props.contains_key("timing"));
        assert!(props.contains_key("tables"));
        assert!(props.contains_key("upload"));
        assert!(props.contains_key("view"));
        // Endpoints are deployment config, not UI
        assert!(!props.contains_key("service"));

        let timing = &props["timing"]["properties"];
        assert!(timing.get("load_debounce_ms").is_some());
    }
}
