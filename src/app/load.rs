//! Identifier validation, loading and literature lookup for [`App`].

use std::fmt;
use std::sync::Arc;

use web_time::Instant;

use super::{App, LoadedStructure, StatusLevel, ValidationIndicator};
use crate::cache::ExistenceOutcome;
use crate::error::ViewerError;
use crate::service::{enrich_citations, ServiceError, StructureService};
use crate::structure::{
    check_structure_text, check_upload, looks_like_structure, PdbId,
};
use crate::view::{MolecularStats, MolecularView, Selection};

/// Where a loaded structure came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureSource {
    /// Downloaded by identifier.
    Entry(PdbId),
    /// Read from a local file with this name.
    Upload(String),
}

impl fmt::Display for StructureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(id) => write!(f, "{id}"),
            Self::Upload(name) => f.write_str(name),
        }
    }
}

impl<S: StructureService, V: MolecularView> App<S, V> {
    /// Track the text of the identifier field.
    ///
    /// A complete, well-formed identifier is checked remotely once typing
    /// pauses; anything else hides the indicator or flags the format.
    pub fn set_input(&mut self, text: &str, now: Instant) {
        self.input = text.to_owned();
        let normalized = PdbId::normalize(text);
        if normalized.len() != 4 {
            let _ = self.validation.cancel();
            self.set_indicator(None, now);
            return;
        }
        match PdbId::parse(&normalized) {
            Ok(id) => {
                self.set_indicator(None, now);
                self.validation.call(id, now);
            }
            Err(e) => {
                let _ = self.validation.cancel();
                self.set_indicator(
                    Some(ValidationIndicator::Invalid(e.to_string())),
                    now,
                );
            }
        }
    }

    /// The identifier field lost focus: check a pending identifier now.
    pub fn blur_input(&mut self, now: Instant) {
        if let Some(id) = self.validation.cancel() {
            self.validate_now(id, now);
        }
    }

    /// Current text of the identifier field.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub(super) fn validate_now(&mut self, id: PdbId, now: Instant) {
        self.set_indicator(Some(ValidationIndicator::Checking), now);
        let outcome = self.existence(id, now);
        let _ = self.finish_validation(id, &outcome, now);
    }

    /// Apply a validation outcome for `id`.
    ///
    /// Returns `false` and changes nothing when the field no longer holds
    /// `id`.
    pub(super) fn finish_validation(
        &mut self,
        id: PdbId,
        outcome: &ExistenceOutcome,
        now: Instant,
    ) -> bool {
        if PdbId::normalize(&self.input) != id.as_str() {
            log::debug!("ignoring stale validation result for {id}");
            return false;
        }
        let indicator = match outcome {
            Ok(_) => ValidationIndicator::Exists,
            Err(e) => ValidationIndicator::Invalid(e.to_string()),
        };
        self.set_indicator(Some(indicator), now);
        true
    }

    /// Existence of `id`, from the cache when possible.
    ///
    /// Successes and authoritative failures are cached; transient failures
    /// are not.
    fn existence(&mut self, id: PdbId, now: Instant) -> ExistenceOutcome {
        if let Some(cached) = self.caches.existence.get_at(id.as_str(), now) {
            log::debug!("existence of {id} served from cache");
            return cached.clone();
        }
        let outcome = self.service.check_exists(&id);
        let cacheable =
            outcome.as_ref().err().is_none_or(ServiceError::is_cacheable);
        if cacheable {
            self.caches
                .existence
                .set_at(id.to_string(), outcome.clone(), now);
        }
        outcome
    }

    /// Validate `input` and schedule a debounced load.
    ///
    /// A malformed identifier is reported in the error banner immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Validation`] when `input` is not a well-formed
    /// identifier; the banner shows the same message.
    pub fn request_load(
        &mut self,
        input: &str,
        now: Instant,
    ) -> Result<(), ViewerError> {
        match PdbId::parse(input) {
            Ok(id) => {
                self.load_request.call(id, now);
                Ok(())
            }
            Err(e) => {
                self.show_error(e.to_string(), now);
                Err(e.into())
            }
        }
    }

    /// Load one of the preset structures immediately, updating the input
    /// field to match.
    ///
    /// # Errors
    ///
    /// Same as [`App::load_by_id`].
    pub fn quick_load(
        &mut self,
        id: PdbId,
        now: Instant,
    ) -> Result<(), ViewerError> {
        let _ = self.load_request.cancel();
        let _ = self.validation.cancel();
        self.input = id.to_string();
        self.set_indicator(None, now);
        self.load_by_id(id, now)
    }

    /// Check, download and show structure `id`.
    ///
    /// Cached text skips both network steps. Every failure is reported in
    /// the error banner and the status line.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Service`] when the existence check or the
    /// download fails, or when the downloaded text is not structure data.
    /// Returns [`ViewerError::Model`] when the widget rejects the text.
    pub fn load_by_id(
        &mut self,
        id: PdbId,
        now: Instant,
    ) -> Result<(), ViewerError> {
        let cached = self
            .caches
            .structures
            .get_at(id.as_str(), now)
            .map(|text| Arc::<str>::from(text.as_str()));
        let text = match cached {
            Some(text) => {
                log::info!("{id} served from structure cache");
                text
            }
            None => match self.fetch_structure(id, now) {
                Ok(text) => text,
                Err(e) => {
                    self.fail_load(id, &e.to_string(), now);
                    return Err(e.into());
                }
            },
        };

        if let Err(e) = self.install(StructureSource::Entry(id), text, now) {
            self.fail_load(id, &e.to_string(), now);
            return Err(e);
        }
        self.set_status(
            StatusLevel::Success,
            format!("{id} loaded successfully"),
        );
        self.warn_if_large();
        self.fetch_literature(id, now);
        Ok(())
    }

    fn fail_load(&mut self, id: PdbId, message: &str, now: Instant) {
        self.show_error(message, now);
        self.set_status(StatusLevel::Error, format!("Failed to load {id}"));
    }

    /// Existence check, then download, then content check.
    fn fetch_structure(
        &mut self,
        id: PdbId,
        now: Instant,
    ) -> Result<Arc<str>, ServiceError> {
        self.set_status(StatusLevel::Info, format!("Checking {id}..."));
        let info = self.existence(id, now)?;
        log::debug!(
            "{id} exists: {}",
            info.title.as_deref().unwrap_or("untitled")
        );

        self.set_status(StatusLevel::Info, format!("Loading {id}..."));
        let text = self.service.download(&id)?;
        if !looks_like_structure(&text) {
            return Err(ServiceError::InvalidContent { id: id.to_string() });
        }
        self.caches
            .structures
            .set_at(id.to_string(), text.clone(), now);
        Ok(Arc::from(text))
    }

    /// Validate and show an uploaded file.
    ///
    /// `size` is the file size reported by the host, checked before the
    /// text is inspected.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Validation`] for a wrong extension, an
    /// oversized or empty file, or text without structure records, and
    /// [`ViewerError::Model`] when the widget rejects the text.
    pub fn load_upload(
        &mut self,
        name: &str,
        size: u64,
        text: &str,
        now: Instant,
    ) -> Result<(), ViewerError> {
        if let Err(e) = check_upload(name, size, &self.options.upload)
            .and_then(|()| check_structure_text(text))
        {
            self.show_error(e.to_string(), now);
            return Err(e.into());
        }
        self.set_status(StatusLevel::Info, format!("Loading {name}..."));

        let source = StructureSource::Upload(name.to_owned());
        if let Err(e) = self.install(source, Arc::from(text), now) {
            let detail = match &e {
                ViewerError::Model(msg) => msg.clone(),
                other => other.to_string(),
            };
            self.set_status(
                StatusLevel::Error,
                format!("Error parsing file: {detail}"),
            );
            return Err(e);
        }
        self.set_status(
            StatusLevel::Success,
            format!("{name} loaded successfully"),
        );
        self.warn_if_large();
        Ok(())
    }

    /// Replace the shown structure with `text`.
    ///
    /// Pending renders are cancelled and all derived state is dropped
    /// before the new model is installed; the render is scheduled last.
    fn install(
        &mut self,
        source: StructureSource,
        text: Arc<str>,
        now: Instant,
    ) -> Result<(), ViewerError> {
        self.render_frame.cancel();
        self.reset_derived();
        self.generation += 1;

        let model = self.view.add_model(&text)?;
        let stats = MolecularStats::from_sites(&self.view.atoms(model));
        let id = match &source {
            StructureSource::Entry(id) => Some(*id),
            StructureSource::Upload(_) => None,
        };
        log::info!("installed {source} as load {}: {stats}", self.generation);

        self.lines.load(&text, id);
        let _ = self.atoms.begin_parse(Arc::clone(&text), self.generation);
        self.loaded = Some(LoadedStructure {
            source,
            text,
            model,
            stats,
        });
        self.apply_style(now);
        self.view.zoom_to(&Selection::all());
        self.view.set_clickable(self.interactive);
        self.request_render(now);
        Ok(())
    }

    /// Drop the model, the panels' records and the selection.
    pub(super) fn reset_derived(&mut self) {
        self.view.remove_all_models();
        self.view.remove_all_shapes();
        self.loaded = None;
        self.selected = None;
        self.style_dirty = false;
        self.atoms.clear();
        self.lines.clear();
        self.literature.clear();
    }

    fn warn_if_large(&mut self) {
        let Some(atoms) = self.loaded.as_ref().map(|l| l.stats.atoms) else {
            return;
        };
        if atoms > self.options.view.large_molecule_atoms {
            self.set_status(
                StatusLevel::Warning,
                format!(
                    "Large molecule detected ({atoms} atoms). Performance may \
                     be affected."
                ),
            );
        }
    }

    /// Fill the literature panel for `id`, from the cache when possible.
    ///
    /// PubMed enrichment of the fetched citations runs concurrently.
    pub fn fetch_literature(&mut self, id: PdbId, now: Instant) {
        self.literature.begin_loading(id);
        if let Some(cached) = self.caches.citations.get_at(id.as_str(), now) {
            let citations = cached.clone();
            self.literature.show(id, citations);
            return;
        }
        match self.service.citations(&id) {
            Ok(citations) => {
                let enriched = enrich_citations(&self.service, citations);
                self.caches
                    .citations
                    .set_at(id.to_string(), enriched.clone(), now);
                self.literature.show(id, enriched);
            }
            Err(e) => {
                log::warn!("Error fetching literature for {id}: {e}");
                self.literature.show_failure(id);
            }
        }
    }
}
