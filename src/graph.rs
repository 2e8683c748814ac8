//! Relation Graph - directed graph of record relations
//!
//! Built from each record's related ids. Every record id becomes a node,
//! and so does every related id, even one no record was created for.

use std::collections::{BTreeMap, BTreeSet};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use crate::edge::Edge;

/// In-memory relation graph.
///
/// Edges form a set: a record listing the same related id twice produces a
/// single edge. Nodes and edges iterate in sorted order.
#[derive(Debug, Default, Clone)]
pub struct RelationGraph {
    /// All node ids, real and dangling
    nodes: BTreeSet<String>,
    /// Ids that belong to a stored record
    records: BTreeSet<String>,
    /// Outgoing neighbours per node
    edges_from: BTreeMap<String, BTreeSet<String>>,
    /// Incoming neighbours per node
    edges_to: BTreeMap<String, BTreeSet<String>>,
}

impl RelationGraph {
    /// Create a new empty relation graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from `(id, related_ids)` pairs as returned by
    /// [`SqliteStore::list_all_with_relations`](crate::SqliteStore::list_all_with_relations).
    pub fn from_relations<I, S>(relations: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for (id, related_ids) in relations {
            let id = id.into();
            graph.add_record(&id);
            for target in related_ids {
                graph.add_edge(Edge::new(id.clone(), target));
            }
        }
        graph
    }

    /// Add a node backed by a stored record
    pub fn add_record(&mut self, id: &str) {
        self.records.insert(id.to_string());
        self.nodes.insert(id.to_string());
    }

    /// Add a node without marking it as a record
    pub fn add_node(&mut self, id: &str) {
        self.nodes.insert(id.to_string());
    }

    /// Add an edge, creating both endpoints if absent
    pub fn add_edge(&mut self, edge: Edge) {
        self.add_node(&edge.from);
        self.add_node(&edge.to);
        if self.contains_edge(&edge.from, &edge.to) {
            tracing::trace!(%edge, "Collapsed repeated relation");
            return;
        }

        self.edges_to
            .entry(edge.to.clone())
            .or_default()
            .insert(edge.from.clone());
        self.edges_from.entry(edge.from).or_default().insert(edge.to);
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edges_from
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    /// Whether the node is referenced but has no backing record
    pub fn is_dangling(&self, id: &str) -> bool {
        self.nodes.contains(id) && !self.records.contains(id)
    }

    /// All node ids in sorted order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// All edges in sorted order
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges_from.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |to| Edge::new(from.clone(), to.clone()))
        })
    }

    /// Ids this node points to
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.edges_from
            .get(id)
            .map(|targets| targets.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Ids pointing at this node
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.edges_to
            .get(id)
            .map(|sources| sources.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Referenced ids with no backing record
    pub fn dangling_nodes(&self) -> Vec<&str> {
        self.nodes
            .difference(&self.records)
            .map(String::as_str)
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges_from.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.node_count(),
            records: self.records.len(),
            dangling: self.nodes.len() - self.records.len(),
            edges: self.edge_count(),
        }
    }
}

impl Serialize for RelationGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let edges: Vec<Edge> = self.edges().collect();
        let mut state = serializer.serialize_struct("RelationGraph", 3)?;
        state.serialize_field("nodes", &self.nodes)?;
        state.serialize_field("dangling", &self.dangling_nodes())?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

/// Statistics about a relation graph
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub records: usize,
    pub dangling: usize,
    pub edges: usize,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Relation Graph Statistics:")?;
        writeln!(f, "  Nodes: {} (records: {}, dangling: {})",
            self.nodes, self.records, self.dangling)?;
        writeln!(f, "  Edges: {}", self.edges)
    }
}
