//! Upload and download sanity checks.

use crate::error::ValidationError;
use crate::options::UploadOptions;

/// Markers at least one of which any usable structure text contains.
const STRUCTURE_MARKERS: [&str; 3] = ["HEADER", "ATOM", "HETATM"];

/// Check an upload's name and size before reading it.
///
/// # Errors
///
/// Returns [`ValidationError::WrongExtension`] or
/// [`ValidationError::TooLarge`].
pub fn check_upload(
    name: &str,
    size: u64,
    limits: &UploadOptions,
) -> Result<(), ValidationError> {
    let suffix = format!(".{}", limits.extension.to_ascii_lowercase());
    if !name.to_ascii_lowercase().ends_with(&suffix) {
        return Err(ValidationError::WrongExtension {
            name: name.to_owned(),
            expected: limits.extension.clone(),
        });
    }
    if size > limits.max_bytes {
        return Err(ValidationError::TooLarge {
            size,
            limit: limits.max_bytes,
        });
    }
    Ok(())
}

/// Check that `text` is non-empty and looks like structure data.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyFile`] for blank text and
/// [`ValidationError::NotStructureText`] when no HEADER/ATOM/HETATM
/// marker is present.
pub fn check_structure_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyFile);
    }
    if !looks_like_structure(text) {
        return Err(ValidationError::NotStructureText);
    }
    Ok(())
}

/// Whether `text` contains any HEADER/ATOM/HETATM marker.
#[must_use]
pub fn looks_like_structure(text: &str) -> bool {
    STRUCTURE_MARKERS.iter().any(|m| text.contains(m))
}
