//! Field values used by filters, sorts and record introspection

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A polymorphic column value
///
/// Stores use it in two directions: filter values are bound into SQL
/// parameters, and in-memory stores read record columns through
/// [`Record::field_value`](crate::core::Record::field_value) to evaluate
/// the same predicates without a database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Equality as a relational `=` sees it.
    ///
    /// Strings compare case-insensitively (MySQL's default collation) and
    /// NULL never equals anything, itself included.
    pub fn sql_eq(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Null, _) | (_, FieldValue::Null) => false,
            (FieldValue::String(a), FieldValue::String(b)) => a.to_lowercase() == b.to_lowercase(),
            (a, b) => a == b,
        }
    }

    /// Ordering used when sorting records in memory.
    ///
    /// NULL sorts first, mirroring MySQL's ascending order. Values of
    /// different kinds are never compared by a well-formed query and
    /// are treated as equal so the sort stays stable.
    pub fn sql_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            (FieldValue::String(a), FieldValue::String(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Conversion from a record column into a [`FieldValue`]
pub trait IntoFieldValue {
    fn into_field_value(self) -> FieldValue;
}

impl IntoFieldValue for String {
    fn into_field_value(self) -> FieldValue {
        FieldValue::String(self)
    }
}

impl IntoFieldValue for &str {
    fn into_field_value(self) -> FieldValue {
        FieldValue::String(self.to_string())
    }
}

impl IntoFieldValue for i64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Integer(self)
    }
}

impl IntoFieldValue for u64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Integer(self as i64)
    }
}

impl IntoFieldValue for bool {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Boolean(self)
    }
}

impl IntoFieldValue for DateTime<Utc> {
    fn into_field_value(self) -> FieldValue {
        FieldValue::DateTime(self)
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn into_field_value(self) -> FieldValue {
        self.map_or(FieldValue::Null, IntoFieldValue::into_field_value)
    }
}

/// A compiled SQL `LIKE` pattern
///
/// `%` matches any run of characters and `_` exactly one; everything else
/// is literal. Matching is case-insensitive and anchored at both ends.
#[derive(Debug, Clone)]
pub struct LikePattern(Regex);

impl LikePattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        for ch in pattern.chars() {
            match ch {
                '%' => source.push_str(".*"),
                '_' => source.push('.'),
                other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        source.push('$');

        RegexBuilder::new(&source)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map(LikePattern)
    }

    /// Only string columns can match; NULL and other kinds never do
    pub fn matches(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::String(s) => self.0.is_match(s),
            _ => false,
        }
    }
}
