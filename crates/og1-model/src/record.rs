//! Draft and validated metadata records.
//!
//! Records are authored by hand in YAML as a mapping of attribute name to a
//! scalar value. Most attributes are text (`long_name`, `units`, vocabulary
//! URIs) but numeric attributes such as `valid_min` or a numeric
//! `_FillValue` are carried through untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Borrow the value as text. Non-text scalars return `None`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// True when this value is text equal to `other`.
    pub fn is_text(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Attribute mapping for one sensor or variable.
///
/// Keys are sorted so that written documents are stable between runs.
pub type DraftRecord = BTreeMap<String, FieldValue>;

/// A named collection of records as stored in one YAML document.
pub type RecordSet = BTreeMap<String, DraftRecord>;

/// Build a record from `(key, text)` pairs.
pub fn text_record<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> DraftRecord {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), FieldValue::from(value)))
        .collect()
}

/// The kind of record being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordClass {
    Sensor,
    Variable,
}

impl RecordClass {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sensor => "sensors",
            Self::Variable => "variables",
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
