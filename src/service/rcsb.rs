//! Blocking RCSB client built on `ureq`.

use ureq::Agent;

use super::wire::{decode_citations, decode_entry_info, decode_pubmed};
use super::{Citation, EntryInfo, ServiceError, StructureService};
use crate::options::ServiceOptions;
use crate::structure::{looks_like_structure, PdbId};

/// Largest JSON document read from the metadata endpoints.
const MAX_JSON_BYTES: u64 = 16 * 1024 * 1024;

/// [`StructureService`] backed by the public RCSB endpoints.
#[derive(Clone)]
pub struct RcsbClient {
    agent: Agent,
    options: ServiceOptions,
}

impl RcsbClient {
    /// Client with one shared agent using the configured timeout.
    #[must_use]
    pub fn new(options: ServiceOptions) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(options.timeout()))
            .build()
            .into();
        Self { agent, options }
    }

    fn entry_url(&self, id: &PdbId) -> String {
        format!("{}/{id}", self.options.entry_url.trim_end_matches('/'))
    }

    /// GET `url` as JSON text. Status errors are mapped for `id`.
    fn get_json(&self, url: &str, id: &str) -> Result<String, ServiceError> {
        let mut response = self
            .agent
            .get(url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| map_error(id, e))?;
        response
            .body_mut()
            .with_config()
            .limit(MAX_JSON_BYTES)
            .read_to_string()
            .map_err(|e| map_error(id, e))
    }
}

/// Map a transport or status error to the viewer's taxonomy.
fn map_error(id: &str, error: ureq::Error) -> ServiceError {
    match error {
        ureq::Error::StatusCode(status) => ServiceError::from_status(id, status),
        other => ServiceError::Network {
            id: id.to_owned(),
            detail: other.to_string(),
        },
    }
}

/// Like [`map_error`], but every status keeps its code: the file server
/// has no authoritative not-found answer of its own.
fn map_download_error(id: &str, error: ureq::Error) -> ServiceError {
    match error {
        ureq::Error::StatusCode(status) => ServiceError::DownloadFailed {
            id: id.to_owned(),
            status,
        },
        other => map_error(id, other),
    }
}

impl StructureService for RcsbClient {
    fn check_exists(&self, id: &PdbId) -> Result<EntryInfo, ServiceError> {
        let body = self.get_json(&self.entry_url(id), id.as_str())?;
        decode_entry_info(&body)
    }

    fn download(&self, id: &PdbId) -> Result<String, ServiceError> {
        let url = format!(
            "{}/{id}.pdb",
            self.options.download_url.trim_end_matches('/')
        );
        log::info!("Downloading {id} from RCSB...");
        let failed = |e: ureq::Error| {
            log::warn!("download of {id} failed: {e}");
            map_download_error(id.as_str(), e)
        };
        let text = self
            .agent
            .get(&url)
            .call()
            .map_err(failed)?
            .body_mut()
            .with_config()
            .limit(self.options.max_download_bytes)
            .read_to_string()
            .map_err(failed)?;
        if !looks_like_structure(&text) {
            return Err(ServiceError::InvalidContent { id: id.to_string() });
        }
        Ok(text)
    }

    fn citations(&self, id: &PdbId) -> Result<Vec<Citation>, ServiceError> {
        let body = self.get_json(&self.entry_url(id), id.as_str())?;
        decode_citations(&body)
    }

    fn enrich_citation(
        &self,
        pubmed_id: u64,
        citation: &Citation,
    ) -> Result<Citation, ServiceError> {
        let url = format!(
            "{}/{pubmed_id}",
            self.options.pubmed_url.trim_end_matches('/')
        );
        let body = self.get_json(&url, &pubmed_id.to_string())?;
        decode_pubmed(&body, pubmed_id, citation)
    }
}
