//! JSON shapes of the RCSB entry and PubMed endpoints.
//!
//! Only the fields the viewer shows are decoded; everything else in the
//! (large) entry document is ignored.

use serde::Deserialize;

use super::{Citation, EntryInfo, ServiceError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EntryWire {
    #[serde(rename = "struct")]
    structure: Option<StructWire>,
    rcsb_accession_info: Option<AccessionWire>,
    citation: Vec<CitationWire>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StructWire {
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AccessionWire {
    initial_release_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CitationWire {
    title: Option<String>,
    rcsb_authors: Vec<String>,
    journal_abbrev: Option<String>,
    year: Option<i32>,
    pdbx_database_id_doi: Option<String>,
    #[serde(alias = "pdbx_database_id_pubmed")]
    pdbx_database_id_pub_med: Option<u64>,
}

impl From<CitationWire> for Citation {
    fn from(wire: CitationWire) -> Self {
        Self {
            title: wire.title,
            authors: wire.rcsb_authors,
            journal: wire.journal_abbrev,
            year: wire.year,
            abstract_text: None,
            doi: wire.pdbx_database_id_doi,
            pubmed_id: wire.pdbx_database_id_pub_med,
        }
    }
}

/// An author given either as a bare name or as `{"name": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthorWire {
    Name(String),
    Object { name: String },
}

impl AuthorWire {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PubmedWire {
    title: Option<String>,
    #[serde(alias = "authors")]
    author: Vec<AuthorWire>,
    journal_abbrev: Option<String>,
    year: Option<i32>,
    #[serde(alias = "rcsb_pubmed_abstract_text")]
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(alias = "rcsb_pubmed_doi")]
    doi: Option<String>,
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, ServiceError> {
    serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Title and release date from an entry document.
///
/// # Errors
///
/// Returns [`ServiceError::Decode`] if `body` is not an entry document.
pub fn decode_entry_info(body: &str) -> Result<EntryInfo, ServiceError> {
    let entry: EntryWire = decode(body)?;
    Ok(EntryInfo {
        title: entry.structure.and_then(|s| s.title),
        release_date: entry
            .rcsb_accession_info
            .and_then(|a| a.initial_release_date),
    })
}

/// Citations listed in an entry document, unenriched.
///
/// # Errors
///
/// Returns [`ServiceError::Decode`] if `body` is not an entry document.
pub fn decode_citations(body: &str) -> Result<Vec<Citation>, ServiceError> {
    let entry: EntryWire = decode(body)?;
    Ok(entry.citation.into_iter().map(Citation::from).collect())
}

/// Merge a PubMed document into `citation`.
///
/// PubMed values win where present; the citation's own title, journal,
/// year and DOI are kept as fallbacks. The author list is replaced by
/// PubMed's, and an abstract is only ever taken from PubMed.
///
/// # Errors
///
/// Returns [`ServiceError::Decode`] if `body` is not a PubMed document.
pub fn decode_pubmed(
    body: &str,
    pubmed_id: u64,
    citation: &Citation,
) -> Result<Citation, ServiceError> {
    let pubmed: PubmedWire = decode(body)?;
    Ok(Citation {
        title: pubmed.title.or_else(|| citation.title.clone()),
        authors: pubmed
            .author
            .into_iter()
            .map(AuthorWire::into_name)
            .collect(),
        journal: pubmed.journal_abbrev.or_else(|| citation.journal.clone()),
        year: pubmed.year.or(citation.year),
        abstract_text: pubmed.abstract_text,
        doi: pubmed.doi.or_else(|| citation.doi.clone()),
        pubmed_id: Some(pubmed_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"{
        "struct": {"title": "CRAMBIN"},
        "rcsb_accession_info": {"initial_release_date": "1981-09-15T00:00:00+0000"},
        "citation": [
            {
                "title": "Water structure of a hydrophobic protein",
                "rcsb_authors": ["Teeter, M.M."],
                "journal_abbrev": "Proc Natl Acad Sci U S A",
                "year": 1984,
                "pdbx_database_id_doi": "10.1073/pnas.81.19.6014",
                "pdbx_database_id_pub_med": 16593516
            },
            {"title": "No ids"}
        ],
        "exptl": [{"method": "X-RAY DIFFRACTION"}]
    }"#;

    #[test]
    fn decodes_entry_metadata() {
        let info = decode_entry_info(ENTRY).unwrap();
        assert_eq!(info.title.as_deref(), Some("CRAMBIN"));
        assert!(info.release_date.unwrap().starts_with("1981-09-15"));
        assert_eq!(decode_entry_info("{}").unwrap(), EntryInfo::default());
    }

    #[test]
    fn decodes_citations() {
        let citations = decode_citations(ENTRY).unwrap();
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0].pubmed_id, Some(16_593_516));
        assert_eq!(citations[0].authors, vec!["Teeter, M.M.".to_owned()]);
        assert_eq!(citations[1].pubmed_id, None);
        assert!(decode_citations("not json").is_err());
    }

    #[test]
    fn pubmed_merges_over_citation() {
        let base = decode_citations(ENTRY).unwrap().remove(0);
        let body = r#"{
            "author": ["Teeter MM", {"name": "Someone Else"}],
            "rcsb_pubmed_abstract_text": "Crambin crystals..."
        }"#;
        let merged = decode_pubmed(body, 16_593_516, &base).unwrap();
        assert_eq!(merged.title, base.title);
        assert_eq!(merged.authors, vec!["Teeter MM", "Someone Else"]);
        assert_eq!(merged.abstract_text.as_deref(), Some("Crambin crystals..."));
        assert_eq!(merged.doi, base.doi);
        assert_eq!(merged.year, Some(1984));
    }
}
