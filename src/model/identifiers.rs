//! Identifier newtypes with smart constructors.
//!
//! Section identifiers validate non-empty strings at construction time.
//! The raw tuple constructor is never exported.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of a narrative section (e.g. `"architecture"`).
///
/// Sections are compared by identity only; two sections with the same id are
/// the same section as far as scroll tracking is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SectionId(String);

/// Rejected section identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Section id must be a non-empty string without surrounding whitespace, got {0:?}")]
pub struct InvalidSectionId(pub String);

impl SectionId {
    /// Smart constructor: rejects empty or whitespace-padded ids.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidSectionId> {
        let raw = raw.into();
        if raw.is_empty() || raw.trim() != raw {
            return Err(InvalidSectionId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SectionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        SectionId::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_id() {
        let id = SectionId::new("section-1").unwrap();
        assert_eq!(id.as_str(), "section-1");
        assert_eq!(id.to_string(), "section-1");
    }

    #[test]
    fn rejects_empty_id() {
        assert_eq!(SectionId::new(""), Err(InvalidSectionId(String::new())));
    }

    #[test]
    fn rejects_padded_id() {
        assert!(SectionId::new(" intro").is_err());
        assert!(SectionId::new("intro\n").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: SectionId = serde_json::from_str("\"intro\"").unwrap();
        assert_eq!(ok.as_str(), "intro");

        let err = serde_json::from_str::<SectionId>("\"\"");
        assert!(err.is_err(), "empty id must not deserialize");
    }
}
