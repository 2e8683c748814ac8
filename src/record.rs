//! Record types - the unit of storage
//!
//! A record is a note with a caller-chosen id, free-form content and an
//! ordered list of ids it relates to. Related ids are not checked against
//! existing records; a target that was never created is a dangling reference.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Separator used when relations are typed or stored as a single string.
pub const RELATION_SEPARATOR: char = ',';

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Natural key, unique across the store
    pub id: String,
    /// Free-form text
    pub content: String,
    /// Ids this record points to, in the order given (duplicates kept)
    pub related_ids: Vec<String>,
}

impl Record {
    pub fn new(id: impl Into<String>, content: impl Into<String>, related_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            related_ids,
        }
    }

    /// Check that the record can be persisted and read back unchanged.
    ///
    /// The id must be non-empty. Related ids must be non-empty and free of
    /// the separator, otherwise the comma encoding would split or drop them.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidRecord("id must not be empty".to_string()));
        }
        for related in &self.related_ids {
            if related.is_empty() {
                return Err(Error::InvalidRecord(format!(
                    "record '{}' has an empty related id",
                    self.id
                )));
            }
            if related.contains(RELATION_SEPARATOR) {
                return Err(Error::InvalidRecord(format!(
                    "related id '{}' contains '{}'",
                    related, RELATION_SEPARATOR
                )));
            }
        }
        Ok(())
    }
}

/// The `(id, content)` pair returned by searches and listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: String,
    pub content: String,
}

impl RecordSummary {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

impl std::fmt::Display for RecordSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID: {}, Content: {}", self.id, self.content)
    }
}

/// Parse operator input like `"a, b,,c"` into `["a", "b", "c"]`.
///
/// Entries are trimmed and empty entries dropped, so a blank line means
/// "no relations".
pub fn parse_related_ids(input: &str) -> Vec<String> {
    input
        .split(RELATION_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
