//! Read-only document access used by local term matching.
//!
//! The document store itself lives outside this crate. Matching only needs a
//! way to look a field up by its [`FieldKey`] and get the value's string form,
//! which is what [`DocumentView`] provides. [`Document`] is an owned in-memory
//! implementation for already-fetched records and tests.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LogicError, Result};
use crate::field::FieldKey;

/// Read accessor over a document's field values.
///
/// Absence of a field is a normal outcome and never an error.
pub trait DocumentView {
    /// String form of the value stored under `key`, if any.
    fn field_value(&self, key: &FieldKey) -> Option<Cow<'_, str>>;
}

/// A stored field value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Multi-valued field; renders as `[a, b, c]`.
    Multi(Vec<FieldValue>),
}

impl FieldValue {
    fn from_json(value: Value) -> Option<FieldValue> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Boolean(b)),
            Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => FieldValue::Integer(i),
                (None, Some(x)) if n.is_f64() => FieldValue::Float(x),
                // Integers past i64 keep their exact digits.
                _ => FieldValue::Text(n.to_string()),
            }),
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Array(items) => Some(FieldValue::Multi(
                items.into_iter().filter_map(FieldValue::from_json).collect(),
            )),
            other @ Value::Object(_) => Some(FieldValue::Text(other.to_string())),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write_float(f, *x),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Multi(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Render a float the way the query engine stringifies stored doubles:
/// always with a fractional part, and in `d.dddE±n` form outside
/// `[1e-3, 1e7)`.
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let magnitude = x.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let plain = x.to_string();
        if plain.contains('.') {
            f.write_str(&plain)
        } else {
            write!(f, "{}.0", plain)
        }
    } else {
        let scientific = format!("{:e}", x);
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        if mantissa.contains('.') {
            write!(f, "{}E{}", mantissa, exponent)
        } else {
            write!(f, "{}.0E{}", mantissa, exponent)
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Multi(values.into_iter().map(Into::into).collect())
    }
}

/// Owned in-memory document keyed by external field name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: BTreeMap<String, FieldValue>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a flat JSON object as returned by the query engine.
    ///
    /// `null` fields are treated as absent, arrays become multi-valued fields.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => {
                let fields = map
                    .into_iter()
                    .filter_map(|(name, value)| FieldValue::from_json(value).map(|v| (name, v)))
                    .collect();
                Ok(Document { fields })
            }
            other => Err(LogicError::InvalidDocument {
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl DocumentView for Document {
    fn field_value(&self, key: &FieldKey) -> Option<Cow<'_, str>> {
        self.fields.get(key.name()).map(|value| match value {
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        })
    }
}

impl DocumentView for HashMap<String, String> {
    fn field_value(&self, key: &FieldKey) -> Option<Cow<'_, str>> {
        self.get(key.name()).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl DocumentView for BTreeMap<String, String> {
    fn field_value(&self, key: &FieldKey) -> Option<Cow<'_, str>> {
        self.get(key.name()).map(|s| Cow::Borrowed(s.as_str()))
    }
}
