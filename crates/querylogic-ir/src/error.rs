//! Error types for the term algebra.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogicError {
    #[error("Value for field {field} contains an unescaped double quote: {value}")]
    MalformedValue { field: String, value: String },
    #[error("Invalid pattern '{pattern}' for field {field}: {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        source: regex::Error,
    },
    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },
    #[error("Unsupported format version {found} (expected {expected})")]
    UnsupportedVersion { found: String, expected: String },
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LogicError>;
