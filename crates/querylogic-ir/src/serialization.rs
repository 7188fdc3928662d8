//! Versioned JSON serialization of terms.
//!
//! Terms derive serde directly; [`VersionedTerm`] wraps one with a format
//! version so stored filters can be checked for compatibility on load.
//! Literals are revalidated when deserialized.

use serde::{Deserialize, Serialize};

use crate::error::{LogicError, Result};
use crate::term::Term;

/// Current serialization format version
pub const FORMAT_VERSION: &str = "1.0.0";

/// Versioned wrapper for Term serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionedTerm {
    /// Format version (semver)
    pub version: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: Option<String>,
    /// Optional metadata
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    /// The term
    pub term: Term,
}

impl VersionedTerm {
    /// Create a new versioned term
    pub fn new(term: Term) -> Self {
        VersionedTerm {
            version: FORMAT_VERSION.to_string(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            metadata: None,
            term,
        }
    }

    /// Create with custom metadata
    pub fn with_metadata(term: Term, metadata: serde_json::Map<String, serde_json::Value>) -> Self {
        VersionedTerm {
            metadata: Some(metadata),
            ..VersionedTerm::new(term)
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to compact JSON
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON, rejecting an incompatible major version
    pub fn from_json(json: &str) -> Result<Self> {
        let versioned: VersionedTerm = serde_json::from_str(json)?;
        if !versioned.is_compatible() {
            return Err(LogicError::UnsupportedVersion {
                found: versioned.version,
                expected: FORMAT_VERSION.to_string(),
            });
        }
        Ok(versioned)
    }

    /// Check if this version is compatible with the current version
    pub fn is_compatible(&self) -> bool {
        major(&self.version).is_some() && major(&self.version) == major(FORMAT_VERSION)
    }

    pub fn into_term(self) -> Term {
        self.term
    }
}

fn major(version: &str) -> Option<&str> {
    version.split('.').next().filter(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Term {
        Term::and(vec![
            Term::literal("host_s", "example\\.org").unwrap(),
            Term::negate(Term::catch_all("robots_i")),
        ])
    }

    #[test]
    fn test_json_roundtrip() {
        let versioned = VersionedTerm::new(sample());
        let json = versioned.to_json_pretty().unwrap();
        let loaded = VersionedTerm::from_json(&json).unwrap();
        assert_eq!(loaded.version, FORMAT_VERSION);
        assert!(loaded.created_at.is_some());
        assert_eq!(loaded.into_term(), sample());
    }

    #[test]
    fn test_metadata() {
        let mut metadata = serde_json::Map::new();
        metadata.insert("origin".to_string(), serde_json::json!("crawler"));
        let versioned = VersionedTerm::with_metadata(sample(), metadata);
        let json = versioned.to_json_compact().unwrap();
        let loaded = VersionedTerm::from_json(&json).unwrap();
        let metadata = loaded.metadata.unwrap();
        assert_eq!(metadata.get("origin"), Some(&serde_json::json!("crawler")));
    }

    #[test]
    fn test_rejects_other_major_version() {
        let mut versioned = VersionedTerm::new(sample());
        versioned.version = "2.0.0".to_string();
        let json = versioned.to_json_compact().unwrap();
        let err = VersionedTerm::from_json(&json).unwrap_err();
        assert!(matches!(err, LogicError::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_rejects_invalid_literal() {
        let json = r#"{"version":"1.0.0","created_at":null,"metadata":null,
            "term":{"Literal":{"key":"title","value":"say \"hi\""}}}"#;
        assert!(matches!(
            VersionedTerm::from_json(json),
            Err(LogicError::Serialization(_))
        ));
    }

    #[test]
    fn test_compatible_minor_version() {
        let mut versioned = VersionedTerm::new(Term::always());
        versioned.version = "1.4.2".to_string();
        assert!(versioned.is_compatible());
        versioned.version = String::new();
        assert!(!versioned.is_compatible());
    }
}
