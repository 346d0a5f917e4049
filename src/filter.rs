/// talentgrid Filter Engine
///
/// Free-text filtering: a record matches when any searchable field's
/// rendered text contains the trimmed, lowercased query. The filter is
/// stable, so matching records keep their original relative order.

use crate::field::FieldDescriptor;
use crate::record::Record;
use serde::{Deserialize, Serialize};

/// The text typed into a table's search box
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterQuery {
    raw: String,
}

impl FilterQuery {
    pub fn new(text: impl Into<String>) -> Self {
        FilterQuery { raw: text.into() }
    }

    /// The text as typed
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Trimmed, lowercased form used for matching
    pub fn needle(&self) -> String {
        self.raw.trim().to_lowercase()
    }

    /// An empty (or all-whitespace) query matches everything
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

impl From<&str> for FilterQuery {
    fn from(text: &str) -> Self {
        FilterQuery::new(text)
    }
}

impl From<String> for FilterQuery {
    fn from(text: String) -> Self {
        FilterQuery::new(text)
    }
}

/// Whether a record matches an already-lowercased needle
pub fn matches(record: &Record, needle: &str, searchable: &[&FieldDescriptor]) -> bool {
    if needle.is_empty() {
        return true;
    }
    searchable
        .iter()
        .any(|field| record.text(&field.name).to_lowercase().contains(needle))
}

/// Positions of the matching records, in input order
pub fn filter_indices(records: &[Record], query: &FilterQuery, searchable: &[&FieldDescriptor]) -> Vec<usize> {
    debug_assert!(!searchable.is_empty(), "filter requires at least one searchable field");

    if query.is_empty() {
        return (0..records.len()).collect();
    }

    let needle = query.needle();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(record, &needle, searchable))
        .map(|(i, _)| i)
        .collect()
}

/// Matching records, in input order.
///
/// # Examples
///
/// ```
/// use talentgrid::{filter, FieldDescriptor, FilterQuery, Record};
///
/// let records = vec![
///     Record::new().with("name", "Bob"),
///     Record::new().with("name", "Amy"),
/// ];
/// let name = FieldDescriptor::text("name").searchable();
///
/// let found = filter(&records, &FilterQuery::new("  AM "), &[&name]);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].text("name"), "Amy");
/// ```
pub fn filter<'a>(records: &'a [Record], query: &FilterQuery, searchable: &[&FieldDescriptor]) -> Vec<&'a Record> {
    filter_indices(records, query, searchable)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}
