//! Edge type - a directed relation between two record ids
//!
//! An edge `from → to` exists when record `from` lists `to` among its
//! related ids. Edges compare by their endpoints only, so a graph holding
//! them as a set collapses repeated relations into one.

use serde::{Deserialize, Serialize};

/// A directed edge in the relation graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the record declaring the relation
    pub from: String,
    /// Related id, which may not name any stored record
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
