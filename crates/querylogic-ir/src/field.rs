//! Schema field handles.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Opaque handle to a schema field.
///
/// The handle resolves to the name the query engine indexes the field under;
/// that name is what serialization writes and what documents are looked up by.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    pub fn new(name: impl Into<String>) -> Self {
        FieldKey(name.into())
    }

    /// External field name used by the query engine.
    pub fn name(&self) -> &str {
        &self.0
    }

    pub(crate) fn hash_code(&self) -> u64 {
        string_hash(&self.0)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldKey {
    fn from(name: &str) -> Self {
        FieldKey::new(name)
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        FieldKey(name)
    }
}

/// String hash shared by the term hash codes.
///
/// Consistent within one build; the std hasher may change between Rust
/// releases, so hash codes are never persisted.
pub(crate) fn string_hash(s: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}
