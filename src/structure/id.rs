//! Four-character PDB identifiers.

use std::fmt;

use crate::error::ValidationError;

/// A normalized PDB identifier: exactly four uppercase ASCII letters or
/// digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdbId([u8; 4]);

impl PdbId {
    /// Trim and uppercase raw user input, without validating it.
    #[must_use]
    pub fn normalize(input: &str) -> String {
        input.trim().to_ascii_uppercase()
    }

    /// Normalize and validate raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] for blank input and
    /// [`ValidationError::MalformedId`] unless the input is four ASCII
    /// letters or digits.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = Self::normalize(input);
        if normalized.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        let bytes: [u8; 4] = normalized
            .as_bytes()
            .try_into()
            .map_err(|_| ValidationError::MalformedId(normalized.clone()))?;
        if !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Err(ValidationError::MalformedId(normalized));
        }
        Ok(Self(bytes))
    }

    /// The identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for PdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PdbId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let id = PdbId::parse("  1crn \n").unwrap();
        assert_eq!(id.as_str(), "1CRN");
        assert_eq!(id.to_string(), "1CRN");
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(PdbId::parse("   "), Err(ValidationError::EmptyId));
        assert_eq!(
            PdbId::parse("1cr"),
            Err(ValidationError::MalformedId("1CR".into()))
        );
        assert_eq!(
            PdbId::parse("1c-n"),
            Err(ValidationError::MalformedId("1C-N".into()))
        );
        // Four chars but eight bytes
        assert!(PdbId::parse("ÄÖÜß").is_err());
    }
}
