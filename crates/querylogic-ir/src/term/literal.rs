//! Atomic field/value conditions.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::DocumentView;
use crate::error::{LogicError, Result};
use crate::field::{string_hash, FieldKey};

/// Reserved value meaning "the field is present", whatever it holds.
///
/// This is the query engine's open range, so the serialized literal selects
/// every document that has the field.
pub const CATCH_ALL: &str = "[* TO *]";

/// An atomic condition binding a field to an expected value.
///
/// The value doubles as a pattern: a document matches when the string form of
/// its field value fully matches the value read as a regular expression.
/// Equality, ordering and hashing only look at the field key and the raw
/// value string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "LiteralRepr", into = "LiteralRepr")]
pub struct Literal {
    key: FieldKey,
    value: String,
    /// Compiled, fully anchored form of `value`; `None` for the catch-all.
    pattern: Option<Regex>,
}

#[derive(Serialize, Deserialize)]
struct LiteralRepr {
    key: FieldKey,
    value: String,
}

impl Literal {
    /// Create a literal, validating the value.
    ///
    /// Fails with [`LogicError::MalformedValue`] if the value contains a double
    /// quote (the query grammar has no escape for it) and with
    /// [`LogicError::InvalidPattern`] if it is not a valid pattern.
    pub fn new(key: impl Into<FieldKey>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();

        if value.contains('"') {
            return Err(LogicError::MalformedValue {
                field: key.name().to_string(),
                value,
            });
        }
        if value == CATCH_ALL {
            return Ok(Literal::catch_all(key));
        }

        let invalid = |source| LogicError::InvalidPattern {
            field: key.name().to_string(),
            pattern: value.clone(),
            source,
        };
        // The raw value must stand alone, otherwise an unbalanced group could
        // close the anchoring wrapper early.
        Regex::new(&value).map_err(invalid)?;
        let pattern = Regex::new(&format!(r"\A(?:{})\z", value)).map_err(invalid)?;

        Ok(Literal {
            key,
            value,
            pattern: Some(pattern),
        })
    }

    /// Presence test on `key`.
    pub fn catch_all(key: impl Into<FieldKey>) -> Self {
        Literal {
            key: key.into(),
            value: CATCH_ALL.to_string(),
            pattern: None,
        }
    }

    pub fn key(&self) -> &FieldKey {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_catch_all(&self) -> bool {
        self.pattern.is_none()
    }

    /// A literal is a single operand.
    pub fn weight(&self) -> usize {
        1
    }

    pub fn hash_code(&self) -> u64 {
        self.key.hash_code().wrapping_add(string_hash(&self.value))
    }

    /// Check the literal against a document.
    ///
    /// A missing field never matches, not even the catch-all.
    pub fn matches<D: DocumentView + ?Sized>(&self, doc: &D) -> bool {
        let Some(found) = doc.field_value(&self.key) else {
            return false;
        };
        match &self.pattern {
            None => true,
            Some(pattern) => pattern.is_match(&found),
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\"{}\"", self.key.name(), self.value)
    }
}

impl TryFrom<LiteralRepr> for Literal {
    type Error = LogicError;

    fn try_from(repr: LiteralRepr) -> Result<Self> {
        Literal::new(repr.key, repr.value)
    }
}

impl From<Literal> for LiteralRepr {
    fn from(literal: Literal) -> Self {
        LiteralRepr {
            key: literal.key,
            value: literal.value,
        }
    }
}
