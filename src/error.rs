//! Crate-level error types.

use std::fmt;

use crate::service::ServiceError;

/// Input rejected before any network or parse work is started.
///
/// The `Display` text is the user-facing banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The identifier field was empty.
    EmptyId,
    /// The identifier was not exactly four ASCII letters or digits.
    MalformedId(String),
    /// An uploaded file did not carry the accepted extension.
    WrongExtension {
        /// Name of the rejected file.
        name: String,
        /// Extension that would have been accepted (without the dot).
        expected: String,
    },
    /// An uploaded file exceeded the size limit.
    TooLarge {
        /// Size of the rejected file in bytes.
        size: u64,
        /// Upper bound in bytes.
        limit: u64,
    },
    /// An uploaded file had no non-whitespace content.
    EmptyFile,
    /// The text contains none of the HEADER/ATOM/HETATM markers.
    NotStructureText,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Please enter a PDB ID"),
            Self::MalformedId(_) => write!(
                f,
                "PDB ID must be exactly 4 characters (letters and numbers \
                 only)"
            ),
            Self::WrongExtension { expected, .. } => write!(
                f,
                "Please select a PDB file (.{expected} extension)"
            ),
            Self::TooLarge { limit, .. } => write!(
                f,
                "File too large. Please select a file smaller than {}MB",
                limit / (1024 * 1024)
            ),
            Self::EmptyFile => write!(f, "File appears to be empty"),
            Self::NotStructureText => {
                write!(f, "File doesn't appear to be a valid PDB format")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors produced by the molview crate.
#[derive(Debug)]
pub enum ViewerError {
    /// Input validation failure (identifier or upload).
    Validation(ValidationError),
    /// Remote structure/citation service failure.
    Service(ServiceError),
    /// The 3D widget refused the structure text.
    Model(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{e}"),
            Self::Service(e) => write!(f, "{e}"),
            Self::Model(msg) => {
                write!(f, "Error parsing PDB data: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Service(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ViewerError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ServiceError> for ViewerError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

impl From<std::io::Error> for ViewerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_banner_text() {
        assert_eq!(ValidationError::EmptyId.to_string(), "Please enter a PDB ID");
        let too_large = ValidationError::TooLarge {
            size: 60 * 1024 * 1024,
            limit: 50 * 1024 * 1024,
        };
        assert_eq!(
            too_large.to_string(),
            "File too large. Please select a file smaller than 50MB"
        );
    }

    #[test]
    fn viewer_error_exposes_source() {
        use std::error::Error;
        let err = ViewerError::from(ValidationError::EmptyFile);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "File appears to be empty");
    }
}
