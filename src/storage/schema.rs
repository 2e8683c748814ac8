//! Database schema definitions

/// SQL to create the record table
///
/// Columns are nullable so files written by earlier tools still open;
/// NULLs read back as empty strings.
pub const CREATE_DATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS data (
    id TEXT PRIMARY KEY,
    content TEXT,
    related_ids TEXT
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_DATA_TABLE]
}
