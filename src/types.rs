//! Type definitions for CSV records and field values

use std::fmt;
use std::ops::Index;

/// One logical row: an ordered sequence of field strings
///
/// Fields are positional. The record is built once by the reader and handed
/// to the caller; nothing in the crate holds on to it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Create a record from its fields
    pub fn new(fields: Vec<String>) -> Self {
        Record { fields }
    }

    /// Get field at column index
    pub fn get(&self, col: usize) -> Option<&str> {
        self.fields.get(col).map(String::as_str)
    }

    /// Get number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True for the single-empty-field record a blank line parses to
    pub fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].is_empty()
    }

    /// Iterate over the fields in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Borrow the fields as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.fields
    }

    /// Consume the record, returning its fields
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl Index<usize> for Record {
    type Output = str;

    fn index(&self, col: usize) -> &str {
        &self.fields[col]
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Record::new(fields)
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Record::new(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for Record {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<S: AsRef<str>> PartialEq<[S]> for Record {
    fn eq(&self, other: &[S]) -> bool {
        self.fields.len() == other.len()
            && self.fields.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> PartialEq<[S; N]> for Record {
    fn eq(&self, other: &[S; N]) -> bool {
        *self == other[..]
    }
}

impl<S: AsRef<str>> PartialEq<Vec<S>> for Record {
    fn eq(&self, other: &Vec<S>) -> bool {
        *self == other[..]
    }
}

/// Result of a single read that keeps blank lines apart from end of stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A record with content
    Record(Record),
    /// A line that parsed to exactly one empty field
    BlankLine,
    /// Nothing left to parse
    EndOfStream,
}

impl ReadOutcome {
    /// Convert to the record, if any
    pub fn into_record(self) -> Option<Record> {
        match self {
            ReadOutcome::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// A value submitted to the writer
///
/// `Empty` stands for null/absence and is written as an empty field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldValue {
    /// Missing value
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl FieldValue {
    /// Render the value as field text
    pub fn as_string(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::String(s) => s.clone(),
            FieldValue::Int(i) => itoa::Buffer::new().format(*i).to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }

    /// Check if value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}
