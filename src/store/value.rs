//! Typed document field values.

use std::cmp::Ordering;

use chrono::{DateTime, SecondsFormat, Utc};

// == Field Value ==
/// A single typed value stored in a document field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Orders two values of the same type.
    ///
    /// Values of different types are incomparable and never match a filter.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => Some(a.cmp(b)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Renders the value as text, timestamps in ISO-8601 form.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Timestamp(ts) => iso_timestamp(ts),
        }
    }

    /// Normalizes a timestamp field to its ISO-8601 string.
    ///
    /// Legacy documents stored the timestamp as a string: those are parsed
    /// and re-rendered, and passed through verbatim when unparseable.
    pub fn to_iso_string(&self) -> String {
        match self {
            FieldValue::Timestamp(ts) => iso_timestamp(ts),
            FieldValue::String(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(parsed) => iso_timestamp(&parsed.with_timezone(&Utc)),
                Err(_) => s.clone(),
            },
            FieldValue::Bool(b) => b.to_string(),
        }
    }

    /// Interprets the value as a boolean flag.
    pub fn as_bool(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::String(s) => s == "true",
            FieldValue::Timestamp(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

/// API-boundary timestamp format: UTC, millisecond precision, `Z` suffix.
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
