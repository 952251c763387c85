//! Harness sessions against real files

use std::io::Cursor;
use std::path::Path;

use pretty_assertions::assert_eq;
use review_core::SessionController;
use review_harness::transport::stdio::run_session;
use review_harness::{FilePageStore, HarnessError, SnapshotHost};
use serde_json::{json, Value};
use shared_types::Actor;
use tempfile::tempdir;

const PAGE: &str = r#"{
    "id": "1:0",
    "name": "Checkout",
    "children": [
        {"id": "2:1", "name": "Overview Board", "type": "FRAME"},
        {"id": "2:2", "name": "Flows", "type": "SECTION", "children": [
            {"id": "3:1", "name": "Checkout payment step", "type": "FRAME"}
        ]},
        {"id": "2:3", "name": "Notes", "type": "TEXT"}
    ]
}"#;

fn run(document: &Path, store: &Path, user: &str, input: &str) -> Vec<Value> {
    let host = SnapshotHost::load(document, Some(Actor::new(user, None))).unwrap();
    let store = FilePageStore::open(store).unwrap();
    let mut session = SessionController::new(host, store);

    let mut output = Vec::new();
    run_session(&mut session, Cursor::new(input), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_state_survives_restart() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("page.json");
    let store = dir.path().join("store.json");
    std::fs::write(&document, PAGE).unwrap();

    let input = [
        json!({"type": "save-manual-checks", "manualChecks": {"annotations": true}}),
        json!({"type": "add-comment", "comment": "Ship it"}),
    ]
    .iter()
    .map(Value::to_string)
    .collect::<Vec<_>>()
    .join("\n");
    let first = run(&document, &store, "Alice", &input);
    assert_eq!(first.len(), 6);
    assert_eq!(first[4]["type"], "checks-updated");
    assert_eq!(first[5]["type"], "comment-added");

    let blobs: Value = serde_json::from_str(&std::fs::read_to_string(&store).unwrap()).unwrap();
    let mut keys: Vec<&str> = blobs.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["peerReviewChecks_1:0", "peerReview_1:0"]);

    let second = run(&document, &store, "Bob", "");
    assert_eq!(second[0]["savedChecks"]["annotations"]["checked"], true);
    assert_eq!(second[0]["savedChecks"]["annotations"]["user"], "Alice");
    assert_eq!(second[1]["peerReview"]["comments"][0]["text"], "Ship it");
    assert_eq!(second[2], json!({"type": "page-info", "pageName": "Checkout"}));
}

#[test]
fn test_validation_over_loaded_document() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("page.json");
    std::fs::write(&document, PAGE).unwrap();

    let events = run(&document, &dir.path().join("store.json"), "Alice", "");
    let results = &events[3]["results"];
    assert_eq!(events[3]["type"], "auto-validation-results");
    assert_eq!(results["overviewBoard"]["passed"], true);
    assert_eq!(results["sections"]["passed"], true);
    assert_eq!(results["frameNames"]["totalFrames"], 1);
    assert_eq!(results["frameNames"]["passed"], true);
    assert_eq!(results["manualChecks"], json!({}));
}

#[test]
fn test_missing_document_is_reported() {
    let dir = tempdir().unwrap();
    let result = SnapshotHost::load(&dir.path().join("absent.json"), None);
    assert!(matches!(result, Err(HarnessError::Read { .. })));
}

#[test]
fn test_malformed_document_is_reported() {
    let dir = tempdir().unwrap();
    let document = dir.path().join("page.json");
    std::fs::write(&document, "{\"children\": 3}").unwrap();
    let result = SnapshotHost::load(&document, None);
    assert!(matches!(result, Err(HarnessError::Document { .. })));
}
