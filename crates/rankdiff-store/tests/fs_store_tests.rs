#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use rankdiff_core::errors::ExErrorKind;
use rankdiff_core::{DocumentResult, QuerySnapshotEntry, Snapshot, SnapshotStore};
use rankdiff_store::FsSnapshotStore;
use tempfile::TempDir;

fn setup_store() -> (FsSnapshotStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FsSnapshotStore::new(temp_dir.path().join(".regfiles"));
    (store, temp_dir)
}

fn snapshot(queries: &[&str]) -> Snapshot {
    Snapshot::from_entries(
        queries
            .iter()
            .map(|q| {
                QuerySnapshotEntry::from_ranked(
                    *q,
                    vec![
                        DocumentResult::new(format!("{}-1", q), 0.9).with_boost(1.0),
                        DocumentResult::new(format!("{}-2", q), 0.4),
                    ],
                )
            })
            .collect(),
    )
}

#[test]
fn test_write_read_roundtrip() {
    let (store, _dir) = setup_store();
    let original = snapshot(&["vpn", "wifi"]);

    let id = store.write_with_id("2024_01_01-09_00_00", &original).unwrap();
    let loaded = store.read(&id).unwrap();

    assert_eq!(loaded, original);
}

#[test]
fn test_read_accepts_json_extension() {
    let (store, _dir) = setup_store();
    store
        .write_with_id("2024_01_01-09_00_00", &snapshot(&["vpn"]))
        .unwrap();

    assert!(store.read("2024_01_01-09_00_00.json").is_ok());
}

#[test]
fn test_list_is_sorted_and_ignores_other_files() {
    let (store, _dir) = setup_store();
    store
        .write_with_id("2024_01_02-09_00_00", &snapshot(&["vpn"]))
        .unwrap();
    store
        .write_with_id("2024_01_01-09_00_00", &snapshot(&["vpn"]))
        .unwrap();
    fs::write(store.root().join("notes.txt"), "ignore me").unwrap();
    fs::create_dir(store.root().join("nested.json")).unwrap();

    let ids: Vec<String> = store.list().unwrap().into_iter().collect();

    assert_eq!(ids, vec!["2024_01_01-09_00_00", "2024_01_02-09_00_00"]);
}

#[test]
fn test_read_missing_reports_available_ids() {
    let (store, _dir) = setup_store();
    store
        .write_with_id("2024_01_01-09_00_00", &snapshot(&["vpn"]))
        .unwrap();

    let err = store.read("2030_01_01-00_00_00").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.missing(), Some(&["2030_01_01-00_00_00".to_string()][..]));
    assert_eq!(
        err.candidates(),
        Some(&["2024_01_01-09_00_00".to_string()][..])
    );
}

#[test]
fn test_unparseable_file_is_corrupt() {
    let (store, _dir) = setup_store();
    fs::create_dir_all(store.root()).unwrap();
    fs::write(store.path_for("2024_01_01-09_00_00"), "{ not json").unwrap();

    let err = store.read("2024_01_01-09_00_00").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::CorruptData);
    assert_eq!(err.snapshot_id(), Some("2024_01_01-09_00_00"));
}

#[test]
fn test_duplicate_queries_in_file_are_corrupt() {
    let (store, _dir) = setup_store();
    fs::create_dir_all(store.root()).unwrap();
    let doubled = r#"[
        {"query": "vpn", "selected_documents": {}},
        {"query": "vpn", "selected_documents": {}}
    ]"#;
    fs::write(store.path_for("2024_01_01-09_00_00"), doubled).unwrap();

    let err = store.read("2024_01_01-09_00_00").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::CorruptData);
    assert!(err.message().contains("duplicate"));
}

#[test]
fn test_existing_id_is_never_overwritten() {
    let (store, _dir) = setup_store();
    let first = snapshot(&["vpn"]);
    store.write_with_id("2024_01_01-09_00_00", &first).unwrap();

    let err = store
        .write_with_id("2024_01_01-09_00_00", &snapshot(&["wifi"]))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(store.read("2024_01_01-09_00_00").unwrap(), first);
}

#[test]
fn test_reads_files_written_by_other_tools() {
    let (store, _dir) = setup_store();
    fs::create_dir_all(store.root()).unwrap();
    let legacy = r#"[
        {
            "query": "reset password",
            "selected_documents": {
                "0": {
                    "document_id": "doc-1",
                    "score": 0.77,
                    "boost": 0,
                    "updated_at": null,
                    "semantic_identifier": "Password reset guide",
                    "blurb": "Open the portal..."
                }
            }
        }
    ]"#;
    fs::write(store.path_for("2023_12_31-23_59_59"), legacy).unwrap();

    let loaded = store.read("2023_12_31-23_59_59").unwrap();
    let doc = loaded
        .entry("reset password")
        .and_then(|e| e.document_at(0))
        .unwrap();

    assert_eq!(
        doc.metadata.get_str("semantic_identifier"),
        Some("Password reset guide")
    );
    assert_eq!(doc.metadata.get_str("blurb"), Some("Open the portal..."));
}
