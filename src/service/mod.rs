//! Remote structure and citation services.
//!
//! [`StructureService`] is the contract the application relies on: an
//! existence check, a structure download, a citation lookup and a
//! per-citation enrichment. [`RcsbClient`] implements it against the RCSB
//! REST endpoints when the `fetch` feature is enabled.

#[cfg(feature = "fetch")]
mod rcsb;
mod wire;

use std::fmt;
use std::thread::ScopedJoinHandle;

#[cfg(feature = "fetch")]
pub use rcsb::RcsbClient;
pub use wire::{decode_citations, decode_entry_info, decode_pubmed};

use crate::structure::PdbId;

/// Failure talking to a remote data service.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The identifier is not in the database (HTTP 404).
    NotFound {
        /// Identifier that was looked up.
        id: String,
    },
    /// The service rejected the identifier (HTTP 400).
    BadRequest {
        /// Identifier that was looked up.
        id: String,
    },
    /// The service failed (HTTP 5xx).
    Server {
        /// Identifier that was looked up.
        id: String,
    },
    /// Any other unsuccessful HTTP status.
    Http {
        /// Identifier that was looked up.
        id: String,
        /// HTTP status code.
        status: u16,
    },
    /// Transport failure: DNS, connection, TLS, timeout.
    Network {
        /// Identifier that was looked up.
        id: String,
        /// Transport error text, for logs.
        detail: String,
    },
    /// The file server answered the structure download with an
    /// unsuccessful HTTP status.
    DownloadFailed {
        /// Identifier that was downloaded.
        id: String,
        /// HTTP status code.
        status: u16,
    },
    /// The download succeeded but does not look like structure text.
    InvalidContent {
        /// Identifier that was downloaded.
        id: String,
    },
    /// A response body could not be decoded.
    Decode(String),
}

impl ServiceError {
    /// Whether this outcome is authoritative and may be cached.
    ///
    /// Only not-found and bad-request answers are; transport and server
    /// failures are retried on the next attempt.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::BadRequest { .. })
    }

    /// Map an HTTP status from an existence check to an error.
    #[must_use]
    pub fn from_status(id: &str, status: u16) -> Self {
        let id = id.to_owned();
        match status {
            404 => Self::NotFound { id },
            400 => Self::BadRequest { id },
            500.. => Self::Server { id },
            _ => Self::Http { id, status },
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => {
                write!(f, "PDB \"{id}\" doesn't exist in the database")
            }
            Self::BadRequest { id } => {
                write!(f, "Invalid PDB ID format: \"{id}\"")
            }
            Self::Server { id } => {
                write!(f, "Server error checking \"{id}\". Try again later")
            }
            Self::Http { id, status } => {
                write!(f, "Error checking PDB \"{id}\" (HTTP {status})")
            }
            Self::Network { id, .. } => write!(
                f,
                "Unable to verify PDB \"{id}\". Check your connection and \
                 try again"
            ),
            Self::DownloadFailed { id, status } => write!(
                f,
                "Failed to download PDB file for \"{id}\" (HTTP {status})"
            ),
            Self::InvalidContent { id } => {
                write!(f, "Invalid PDB data received for \"{id}\"")
            }
            Self::Decode(detail) => {
                write!(f, "Unexpected response from data service: {detail}")
            }
        }
    }
}

impl std::error::Error for ServiceError {}

/// Minimal metadata returned by an existence check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryInfo {
    /// Structure title.
    pub title: Option<String>,
    /// Initial release date, `YYYY-MM-DD...`.
    pub release_date: Option<String>,
}

/// One publication associated with a structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Citation {
    /// Article title.
    pub title: Option<String>,
    /// Author names in order.
    pub authors: Vec<String>,
    /// Journal abbreviation.
    pub journal: Option<String>,
    /// Publication year.
    pub year: Option<i32>,
    /// Abstract text, when enriched.
    pub abstract_text: Option<String>,
    /// DOI without the resolver prefix.
    pub doi: Option<String>,
    /// PubMed identifier.
    pub pubmed_id: Option<u64>,
}

/// Authors shown before the list is abbreviated.
const SUMMARY_AUTHORS: usize = 3;

impl Citation {
    /// Title or `"Untitled"`.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// First three authors, then `et al.`; `"Unknown authors"` when none.
    #[must_use]
    pub fn author_summary(&self) -> String {
        if self.authors.is_empty() {
            return "Unknown authors".to_owned();
        }
        let mut summary = self
            .authors
            .iter()
            .take(SUMMARY_AUTHORS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if self.authors.len() > SUMMARY_AUTHORS {
            summary.push_str(" et al.");
        }
        summary
    }

    /// Every author, comma separated.
    #[must_use]
    pub fn author_list(&self) -> String {
        if self.authors.is_empty() {
            "Unknown authors".to_owned()
        } else {
            self.authors.join(", ")
        }
    }

    /// Journal or `"Unknown journal"`, followed by `(year)` when known.
    #[must_use]
    pub fn journal_line(&self) -> String {
        let journal = self.journal.as_deref().unwrap_or("Unknown journal");
        self.year.map_or_else(
            || journal.to_owned(),
            |year| format!("{journal} ({year})"),
        )
    }

    /// Abstract or a placeholder.
    #[must_use]
    pub fn abstract_or_placeholder(&self) -> &str {
        self.abstract_text
            .as_deref()
            .unwrap_or("No abstract available.")
    }

    /// Link to the article through the DOI resolver.
    #[must_use]
    pub fn doi_url(&self) -> Option<String> {
        self.doi.as_ref().map(|doi| format!("https://doi.org/{doi}"))
    }

    /// Link to the PubMed record.
    #[must_use]
    pub fn pubmed_url(&self) -> Option<String> {
        self.pubmed_id
            .map(|id| format!("https://pubmed.ncbi.nlm.nih.gov/{id}/"))
    }
}

/// Remote lookups the viewer depends on.
///
/// Implementations block the calling thread; the application sequences the
/// existence check before the download and fans citation enrichment out
/// with [`enrich_citations`].
pub trait StructureService: Send + Sync {
    /// Lightweight metadata lookup used to validate an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] or [`ServiceError::BadRequest`]
    /// for authoritative answers and other variants for server or transport
    /// failures.
    fn check_exists(&self, id: &PdbId) -> Result<EntryInfo, ServiceError>;

    /// Raw structure text for `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the file cannot be fetched or is not
    /// structure text.
    fn download(&self, id: &PdbId) -> Result<String, ServiceError>;

    /// Citations recorded for `id`, unenriched.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the entry cannot be fetched or
    /// decoded.
    fn citations(&self, id: &PdbId) -> Result<Vec<Citation>, ServiceError>;

    /// Merge the PubMed record `pubmed_id` into `citation`.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the PubMed record cannot be fetched
    /// or decoded.
    fn enrich_citation(
        &self,
        pubmed_id: u64,
        citation: &Citation,
    ) -> Result<Citation, ServiceError>;
}

/// Enrich every citation that carries a PubMed id, concurrently.
///
/// Requests run on scoped threads and are all joined before returning.
/// A failed enrichment degrades to the unenriched citation.
#[must_use]
pub fn enrich_citations<S>(service: &S, citations: Vec<Citation>) -> Vec<Citation>
where
    S: StructureService + ?Sized,
{
    std::thread::scope(|scope| {
        let handles: Vec<_> = citations
            .into_iter()
            .map(|citation| {
                let handle = citation.pubmed_id.map(|pubmed_id| {
                    let original = citation.clone();
                    scope.spawn(move || {
                        service.enrich_citation(pubmed_id, &original)
                    })
                });
                (citation, handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(citation, handle)| match handle.map(ScopedJoinHandle::join) {
                None => citation,
                Some(Ok(Ok(enriched))) => enriched,
                Some(Ok(Err(e))) => {
                    log::warn!(
                        "Failed to fetch PubMed details for {:?}: {e}",
                        citation.pubmed_id
                    );
                    citation
                }
                Some(Err(_)) => {
                    log::warn!("PubMed enrichment thread panicked");
                    citation
                }
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Enricher {
        calls: AtomicUsize,
    }

    impl StructureService for Enricher {
        fn check_exists(&self, _: &PdbId) -> Result<EntryInfo, ServiceError> {
            Ok(EntryInfo::default())
        }

        fn download(&self, id: &PdbId) -> Result<String, ServiceError> {
            Err(ServiceError::DownloadFailed {
                id: id.to_string(),
                status: 404,
            })
        }

        fn citations(&self, _: &PdbId) -> Result<Vec<Citation>, ServiceError> {
            Ok(Vec::new())
        }

        fn enrich_citation(
            &self,
            pubmed_id: u64,
            citation: &Citation,
        ) -> Result<Citation, ServiceError> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            if pubmed_id == 13 {
                return Err(ServiceError::Http {
                    id: pubmed_id.to_string(),
                    status: 503,
                });
            }
            Ok(Citation {
                abstract_text: Some(format!("abstract {pubmed_id}")),
                ..citation.clone()
            })
        }
    }

    fn citation(title: &str, pubmed_id: Option<u64>) -> Citation {
        Citation {
            title: Some(title.to_owned()),
            pubmed_id,
            ..Citation::default()
        }
    }

    #[test]
    fn enrichment_keeps_order_and_degrades_failures() {
        let service = Enricher {
            calls: AtomicUsize::new(0),
        };
        let out = enrich_citations(
            &service,
            vec![
                citation("a", Some(1)),
                citation("b", None),
                citation("c", Some(13)),
            ],
        );
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].abstract_text.as_deref(), Some("abstract 1"));
        assert_eq!(out[1], citation("b", None));
        assert_eq!(out[2], citation("c", Some(13)));
    }

    #[test]
    fn status_mapping_and_messages() {
        assert_eq!(
            ServiceError::from_status("1ABC", 404).to_string(),
            "PDB \"1ABC\" doesn't exist in the database"
        );
        assert!(ServiceError::from_status("1ABC", 400).is_cacheable());
        assert!(matches!(
            ServiceError::from_status("1ABC", 503),
            ServiceError::Server { .. }
        ));
        let http = ServiceError::from_status("1ABC", 403);
        assert!(!http.is_cacheable());
        assert_eq!(http.to_string(), "Error checking PDB \"1ABC\" (HTTP 403)");
    }

    #[test]
    fn citation_display_helpers() {
        let mut c = Citation {
            authors: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            year: Some(1998),
            doi: Some("10.1/x".into()),
            ..Citation::default()
        };
        assert_eq!(c.display_title(), "Untitled");
        assert_eq!(c.author_summary(), "A, B, C et al.");
        assert_eq!(c.journal_line(), "Unknown journal (1998)");
        assert_eq!(c.doi_url().as_deref(), Some("https://doi.org/10.1/x"));
        assert_eq!(c.pubmed_url(), None);
        c.authors.truncate(2);
        assert_eq!(c.author_summary(), "A, B");
        c.authors.clear();
        assert_eq!(c.author_summary(), "Unknown authors");
        assert_eq!(c.abstract_or_placeholder(), "No abstract available.");
    }
}
