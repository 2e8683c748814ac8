use notelink::{Error, Record, RecordSummary, RelationGraph, SqliteStore};

fn record(id: &str, content: &str, related: &[&str]) -> Record {
    Record::new(id, content, related.iter().map(|s| s.to_string()).collect())
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");

    let store = SqliteStore::open(&path).unwrap();
    store.insert_record(&record("a", "alpha", &["b", "ghost"])).unwrap();
    store.insert_record(&record("b", "beta", &[])).unwrap();
    store.close().unwrap();

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(
        reopened.list_all().unwrap(),
        vec![RecordSummary::new("a", "alpha"), RecordSummary::new("b", "beta")]
    );
    assert_eq!(
        reopened.get_record("a").unwrap().unwrap().related_ids,
        vec!["b", "ghost"]
    );

    let err = reopened.insert_record(&record("a", "again", &[])).unwrap_err();
    assert!(matches!(err, Error::DuplicateId(_)));
}

#[test]
fn open_creates_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("fresh.db")).unwrap();

    assert_eq!(store.count_records().unwrap(), 0);
    assert!(store.list_all().unwrap().is_empty());
    assert!(store.list_all_with_relations().unwrap().is_empty());
}

#[test]
fn open_in_missing_directory_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.db");

    let err = SqliteStore::open(&path).err().unwrap();
    assert!(matches!(err, Error::StorageUnavailable(_)));
}

#[test]
fn insert_search_delete_visualize_walkthrough() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.insert_record(&record("r1", "hello world", &["r2"])).unwrap();
    store.insert_record(&record("r2", "goodbye", &[])).unwrap();

    assert_eq!(
        store.search_by_keyword("hello").unwrap(),
        vec![RecordSummary::new("r1", "hello world")]
    );
    assert_eq!(
        store.list_all().unwrap(),
        vec![
            RecordSummary::new("r1", "hello world"),
            RecordSummary::new("r2", "goodbye"),
        ]
    );

    assert_eq!(store.delete_record("r1").unwrap(), 1);
    assert_eq!(store.list_all().unwrap(), vec![RecordSummary::new("r2", "goodbye")]);

    let graph = RelationGraph::from_relations(store.list_all_with_relations().unwrap());
    assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["r2"]);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn delete_removes_only_the_target() {
    let store = SqliteStore::open_in_memory().unwrap();
    for id in ["x", "y", "z"] {
        store.insert_record(&record(id, id, &[])).unwrap();
    }

    assert_eq!(store.delete_record("y").unwrap(), 1);
    let ids: Vec<String> = store.list_all().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["x", "z"]);
}
