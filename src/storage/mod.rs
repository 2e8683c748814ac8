//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - data(id, content, related_ids)
//!
//! `related_ids` is stored comma-joined in the row itself. The encoding is
//! private to this module; callers only see `Vec<String>`.

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;
