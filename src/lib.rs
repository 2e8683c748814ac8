//! # Notelink - Personal Knowledge Store
//!
//! Linked notes kept in a single SQLite table.
//!
//! Notelink provides:
//! - Records with a caller-chosen id, free-text content and related ids
//! - SQLite-backed storage with keyword search, listing and deletion
//! - Relation graph derived from the related ids, dangling targets included
//! - Text, Graphviz DOT and JSON renderings of that graph
//! - An interactive menu shell over any reader/writer pair

pub mod record;
pub mod edge;
pub mod graph;
pub mod storage;
pub mod render;
pub mod shell;
pub mod output;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use record::{Record, RecordSummary};
pub use edge::Edge;
pub use graph::RelationGraph;
pub use storage::SqliteStore;

/// Result type alias for Notelink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Notelink operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("A record with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
