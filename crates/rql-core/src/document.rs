//! The document data model.
//!
//! A [`Document`] is one semantic value received from the database: plain
//! JSON shapes plus the two pseudo-types the wire protocol layers on top of
//! JSON, timestamps and raw binary blobs. Documents are immutable once
//! received; the renderer only ever reads them.

use chrono::{DateTime, FixedOffset};
use serde_json::{Number, Value};

/// Key marking a successful response that is itself an error report.
///
/// A mapping result carrying this field is a soft in-band error: it is
/// detected structurally before any other rendering decision and written
/// to the error stream instead of being formatted as a document.
pub const FIRST_ERROR_KEY: &str = "first_error";

/// One semantic value produced by running a query.
///
/// Mapping entries preserve insertion order; the encoder decides whether
/// to sort them at render time.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    /// JSON null.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, kept lossless via [`serde_json::Number`].
    Number(Number),
    /// JSON string.
    String(String),
    /// Ordered sequence of documents.
    Array(Vec<Document>),
    /// Mapping from string keys to documents, in insertion order.
    Object(Vec<(String, Document)>),
    /// A timestamp with its original UTC offset.
    Time(DateTime<FixedOffset>),
    /// A raw byte blob. May contain bytes that are illegal inside a naive
    /// string escaper, notably NUL.
    Binary(Vec<u8>),
}

impl Document {
    /// Whether this document is a primitive scalar, i.e. neither a mapping
    /// nor a sequence.
    ///
    /// Drives the interactive renderer's "small array of primitives"
    /// branch.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Look up a key in a mapping document.
    ///
    /// Returns `None` for non-mappings and missing keys. The first entry
    /// wins if a key was somehow duplicated on the wire.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Extract the soft in-band error message, if this document is one.
    ///
    /// Only a mapping with a string-valued [`FIRST_ERROR_KEY`] field
    /// qualifies.
    #[must_use]
    pub fn soft_error(&self) -> Option<&str> {
        match self.get(FIRST_ERROR_KEY) {
            Some(Self::String(message)) => Some(message),
            _ => None,
        }
    }
}

impl From<Value> for Document {
    /// Structural conversion from plain JSON.
    ///
    /// Pseudo-type interpretation (`TIME`, `BINARY`) is the wire layer's
    /// concern, not this conversion's.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Document {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<u64> for Document {
    fn from(n: u64) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Self::Array(items)
    }
}
