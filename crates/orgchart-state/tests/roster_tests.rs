//! Tests for roster parsing and loading.

use orgchart_state::{load_roster, load_roster_str, parse_roster, roster_to_json, StateError};

const ARRAY_ROSTER: &str = r#"[
    {"id": "1", "name": "Shalin Jain", "designation": "CEO", "team": "Leadership", "managerId": null},
    {"id": "2", "name": "Pradeek J", "designation": "CTO", "team": "Leadership", "managerId": "1"},
    {"id": "3", "name": "person1", "designation": "engineer", "team": "Engineering", "managerId": "2"}
]"#;

#[test]
fn parses_bare_array() {
    let employees = parse_roster(ARRAY_ROSTER).unwrap();
    assert_eq!(employees.len(), 3);
    assert_eq!(employees[2].name, "person1");
}

#[test]
fn parses_envelope() {
    let json = format!(r#"{{"employees": {ARRAY_ROSTER}}}"#);
    let store = load_roster_str(&json).unwrap();
    assert_eq!(store.len(), 3);
    let ids: Vec<&str> = store.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn rejects_object_without_employees_key() {
    let err = parse_roster(r#"{"staff": []}"#).unwrap_err();
    assert!(matches!(err, StateError::RosterFormat(_)));
}

#[test]
fn rejects_scalar_document() {
    let err = parse_roster("42").unwrap_err();
    assert!(matches!(err, StateError::RosterFormat(_)));
}

#[test]
fn rejects_malformed_json() {
    let err = parse_roster("[{").unwrap_err();
    assert!(matches!(err, StateError::Serialization(_)));
}

#[test]
fn rejects_duplicate_ids() {
    let json = r#"[
        {"id": "1", "name": "a", "designation": "x", "team": "t"},
        {"id": "1", "name": "b", "designation": "y", "team": "t"}
    ]"#;
    let err = load_roster_str(json).unwrap_err();
    assert!(matches!(err, StateError::DuplicateEmployee(ref id) if id == "1"));
}

#[test]
fn empty_roster_is_empty_store() {
    let store = load_roster_str("[]").unwrap();
    assert!(store.is_empty());
}

#[test]
fn serialized_roster_round_trips() {
    let store = load_roster_str(ARRAY_ROSTER).unwrap();
    let json = roster_to_json(&store).unwrap();
    let reloaded = load_roster_str(&json).unwrap();
    assert_eq!(store.to_vec(), reloaded.to_vec());

    let original: serde_json::Value = serde_json::from_str(ARRAY_ROSTER).unwrap();
    let written: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(original, written);
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");
    std::fs::write(&path, ARRAY_ROSTER).unwrap();
    let store = load_roster(&path).unwrap();
    assert_eq!(store.len(), 3);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = load_roster(&path).unwrap_err();
    assert!(matches!(err, StateError::RosterIo { .. }));
}
