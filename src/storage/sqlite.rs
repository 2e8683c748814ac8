//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use crate::record::{RELATION_SEPARATOR, Record, RecordSummary};
use crate::{Error, Result};
use super::schema;

/// SQLite-backed storage for records.
///
/// The store owns its connection; dropping it or calling [`SqliteStore::close`]
/// releases the file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::info!("Opened record store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Close the connection, reporting any error the drop would swallow
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::StorageUnavailable(e))?;
        tracing::info!("Closed record store");
        Ok(())
    }

    // ========== Record Operations ==========

    /// Insert a new record.
    ///
    /// Fails with [`Error::DuplicateId`] if the id is taken, leaving the
    /// existing row untouched.
    pub fn insert_record(&self, record: &Record) -> Result<()> {
        record.validate()?;

        let result = self.conn.execute(
            "INSERT INTO data (id, content, related_ids) VALUES (?1, ?2, ?3)",
            params![
                record.id,
                record.content,
                encode_related_ids(&record.related_ids),
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!(id = %record.id, relations = record.related_ids.len(), "Inserted record");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                tracing::debug!(id = %record.id, "Rejected duplicate id");
                Err(Error::DuplicateId(record.id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a full record by id
    pub fn get_record(&self, id: &str) -> Result<Option<Record>> {
        self.conn
            .query_row(
                "SELECT id, content, related_ids FROM data WHERE id = ?1",
                [id],
                |row| {
                    let related: Option<String> = row.get(2)?;
                    Ok(Record {
                        id: row.get(0)?,
                        content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        related_ids: decode_related_ids(related.as_deref()),
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find records whose content contains `keyword` (case-sensitive).
    ///
    /// Uses `instr` rather than `LIKE`, which would fold ASCII case and
    /// treat `%` and `_` as wildcards. An empty keyword matches every record.
    pub fn search_by_keyword(&self, keyword: &str) -> Result<Vec<RecordSummary>> {
        if keyword.is_empty() {
            return self.list_all();
        }

        let mut stmt = self.conn.prepare(
            "SELECT id, content FROM data WHERE instr(content, ?1) > 0 ORDER BY id"
        )?;

        let results = stmt
            .query_map([keyword], |row| self.row_to_summary(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(keyword, matches = results.len(), "Searched records");
        Ok(results)
    }

    /// List every record as `(id, content)`, ascending by id.
    ///
    /// Ordering uses SQLite's BINARY collation, i.e. byte order of the UTF-8
    /// text, which matches code-point order.
    pub fn list_all(&self) -> Result<Vec<RecordSummary>> {
        let mut stmt = self.conn.prepare("SELECT id, content FROM data ORDER BY id")?;

        let results = stmt
            .query_map([], |row| self.row_to_summary(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(results)
    }

    /// Delete a record by id, returning the number of rows removed (0 or 1)
    pub fn delete_record(&self, id: &str) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM data WHERE id = ?1", [id])?;
        tracing::debug!(id, removed, "Deleted record");
        Ok(removed)
    }

    /// Every record's id with its related ids, in no particular order
    pub fn list_all_with_relations(&self) -> Result<Vec<(String, Vec<String>)>> {
        let mut stmt = self.conn.prepare("SELECT id, related_ids FROM data")?;

        let relations = stmt
            .query_map([], |row| {
                let id: String = row.get(0)?;
                let related: Option<String> = row.get(1)?;
                Ok((id, decode_related_ids(related.as_deref())))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(relations)
    }

    /// Count all records
    pub fn count_records(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM data", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| Error::from(rusqlite::Error::IntegralValueOutOfRange(0, count)))
    }

    /// Helper to convert an `(id, content)` row to a RecordSummary
    fn row_to_summary(&self, row: &rusqlite::Row) -> rusqlite::Result<RecordSummary> {
        Ok(RecordSummary {
            id: row.get(0)?,
            content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        })
    }
}

/// Join related ids for the `related_ids` column; no relations is `""`.
fn encode_related_ids(related_ids: &[String]) -> String {
    related_ids.join(&RELATION_SEPARATOR.to_string())
}

/// Split the `related_ids` column back into ids; `""` and NULL are empty.
fn decode_related_ids(column: Option<&str>) -> Vec<String> {
    match column {
        None | Some("") => Vec::new(),
        Some(joined) => joined.split(RELATION_SEPARATOR).map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, content: &str, related: &[&str]) -> Record {
        Record::new(id, content, related.iter().map(|s| s.to_string()).collect())
    }

    fn summary(id: &str, content: &str) -> RecordSummary {
        RecordSummary::new(id, content)
    }

    #[test]
    fn test_insert_and_list_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let rec = record("n1", "first note", &["n2", "n3", "n2"]);

        store.insert_record(&rec).unwrap();

        assert_eq!(store.list_all().unwrap(), vec![summary("n1", "first note")]);
        assert_eq!(
            store.list_all_with_relations().unwrap(),
            vec![("n1".to_string(), rec.related_ids.clone())]
        );
        assert_eq!(store.get_record("n1").unwrap(), Some(rec));
    }

    #[test]
    fn test_empty_relations_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_record(&record("lonely", "", &[])).unwrap();

        let relations = store.list_all_with_relations().unwrap();
        assert_eq!(relations, vec![("lonely".to_string(), Vec::new())]);
    }

    #[test]
    fn test_duplicate_id_leaves_store_unchanged() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_record(&record("dup", "original", &["x"])).unwrap();

        let err = store.insert_record(&record("dup", "replacement", &[])).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(ref id) if id == "dup"));

        let kept = store.get_record("dup").unwrap().unwrap();
        assert_eq!(kept.content, "original");
        assert_eq!(kept.related_ids, vec!["x"]);
        assert_eq!(store.count_records().unwrap(), 1);
    }

    #[test]
    fn test_invalid_record_is_not_persisted() {
        let store = SqliteStore::open_in_memory().unwrap();

        let err = store.insert_record(&record("", "no id", &[])).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));

        let err = store.insert_record(&record("a", "", &["b,c"])).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));

        assert_eq!(store.count_records().unwrap(), 0);
    }

    #[test]
    fn test_search_is_case_sensitive_substring() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_record(&record("a", "Hello World", &[])).unwrap();
        store.insert_record(&record("b", "hello there", &[])).unwrap();
        store.insert_record(&record("c", "goodbye", &[])).unwrap();

        assert_eq!(store.search_by_keyword("hello").unwrap(), vec![summary("b", "hello there")]);
        assert_eq!(store.search_by_keyword("Hello").unwrap(), vec![summary("a", "Hello World")]);
        assert_eq!(store.search_by_keyword("o").unwrap().len(), 3);
        assert!(store.search_by_keyword("missing").unwrap().is_empty());
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_record(&record("a", "100% done", &[])).unwrap();
        store.insert_record(&record("b", "snake_case", &[])).unwrap();
        store.insert_record(&record("c", "plain", &[])).unwrap();

        assert_eq!(store.search_by_keyword("%").unwrap(), vec![summary("a", "100% done")]);
        assert_eq!(store.search_by_keyword("_").unwrap(), vec![summary("b", "snake_case")]);
    }

    #[test]
    fn test_empty_keyword_matches_everything() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_record(&record("a", "x", &[])).unwrap();
        store.insert_record(&record("b", "", &[])).unwrap();

        assert_eq!(store.search_by_keyword("").unwrap().len(), 2);
    }

    #[test]
    fn test_list_all_sorted_by_byte_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for id in ["b", "10", "a", "B", "2", "é"] {
            store.insert_record(&record(id, id, &[])).unwrap();
        }

        let ids: Vec<String> = store.list_all().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["10", "2", "B", "a", "b", "é"]);
    }

    #[test]
    fn test_delete_existing_and_missing() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert_record(&record("keep", "k", &[])).unwrap();
        store.insert_record(&record("drop", "d", &["keep"])).unwrap();

        assert_eq!(store.delete_record("drop").unwrap(), 1);
        assert_eq!(store.delete_record("drop").unwrap(), 0);
        assert_eq!(store.delete_record("never").unwrap(), 0);

        assert_eq!(store.list_all().unwrap(), vec![summary("keep", "k")]);
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute("INSERT INTO data (id, content, related_ids) VALUES ('old', NULL, NULL)", [])
            .unwrap();

        assert_eq!(store.list_all().unwrap(), vec![summary("old", "")]);
        assert_eq!(
            store.list_all_with_relations().unwrap(),
            vec![("old".to_string(), Vec::new())]
        );
    }

    #[test]
    fn test_count_tracks_inserts_and_deletes() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.count_records().unwrap(), 0);

        store.insert_record(&record("a", "", &[])).unwrap();
        store.insert_record(&record("b", "", &[])).unwrap();
        assert_eq!(store.count_records().unwrap(), 2);

        store.delete_record("a").unwrap();
        assert_eq!(store.count_records().unwrap(), 1);
    }

    #[test]
    fn test_related_id_codec() {
        let ids = vec!["a".to_string(), "b".to_string()];
        assert_eq!(encode_related_ids(&ids), "a,b");
        assert_eq!(decode_related_ids(Some("a,b")), ids);
        assert_eq!(encode_related_ids(&[]), "");
        assert!(decode_related_ids(Some("")).is_empty());
        assert!(decode_related_ids(None).is_empty());
    }
}
