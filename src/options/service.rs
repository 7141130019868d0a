use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Service", inline)]
#[serde(default)]
/// Remote endpoints and request limits.
pub struct ServiceOptions {
    /// Entry metadata endpoint; the PDB id is appended as a path segment.
    #[schemars(title = "Entry URL")]
    pub entry_url: String,
    /// PubMed detail endpoint; the PubMed id is appended.
    #[schemars(title = "PubMed URL")]
    pub pubmed_url: String,
    /// Structure file download base; `{id}.pdb` is appended.
    #[schemars(title = "Download URL")]
    pub download_url: String,
    /// Whole-request timeout in seconds.
    #[schemars(title = "Timeout (s)", range(min = 1))]
    pub timeout_secs: u64,
    /// Largest structure body accepted from the download endpoint.
    #[schemars(title = "Max Download Bytes")]
    pub max_download_bytes: u64,
}

impl ServiceOptions {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            entry_url: "https://data.rcsb.org/rest/v1/core/entry".into(),
            pubmed_url: "https://data.rcsb.org/rest/v1/core/pubmed".into(),
            download_url: "https://files.rcsb.org/download".into(),
            timeout_secs: 30,
            max_download_bytes: 64 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Upload", inline)]
#[serde(default)]
/// Limits applied to locally uploaded structure files.
pub struct UploadOptions {
    /// Accepted file extension, without the dot (case-insensitive).
    #[schemars(title = "Extension")]
    pub extension: String,
    /// Largest accepted file in bytes.
    #[schemars(title = "Max Bytes")]
    pub max_bytes: u64,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            extension: "pdb".into(),
            max_bytes: 50 * 1024 * 1024,
        }
    }
}
