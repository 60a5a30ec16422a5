//! Tests for the employee store.
//!
//! Verifies:
//! - Lookup by identifier and graceful misses
//! - Insertion-order stability across reads, upserts and removals
//! - Removal leaves reports with a dangling manager reference

use orgchart_protocol::{Employee, EmployeeId};
use orgchart_state::EmployeeStore;

fn seed() -> EmployeeStore {
    [
        Employee::new("1", "Shalin Jain", "CEO", "Leadership"),
        Employee::new("2", "Pradeek J", "CTO", "Leadership").with_manager("1"),
        Employee::new("3", "person1", "engineer", "Engineering").with_manager("2"),
        Employee::new("4", "person2", "engineer", "Engineering").with_manager("2"),
    ]
    .into_iter()
    .collect()
}

fn ids(store: &EmployeeStore) -> Vec<String> {
    store.iter().map(|e| e.id.to_string()).collect()
}

// ═══════════════════════════════════════════════════════════════
// Reads
// ═══════════════════════════════════════════════════════════════

#[test]
fn get_all_is_insertion_ordered() {
    let store = seed();
    assert_eq!(ids(&store), vec!["1", "2", "3", "4"]);
    assert_eq!(store.get_all().len(), 4);
}

#[test]
fn get_unknown_is_none() {
    let store = seed();
    assert!(store.get("99").is_none());
    assert!(!store.contains("99"));
}

#[test]
fn reads_are_stable() {
    let store = seed();
    assert_eq!(ids(&store), ids(&store));
}

#[test]
fn empty_store_reads() {
    let store = EmployeeStore::new();
    assert!(store.is_empty());
    assert!(store.get_all().is_empty());
    assert_eq!(store.len(), 0);
}

// ═══════════════════════════════════════════════════════════════
// Writes
// ═══════════════════════════════════════════════════════════════

#[test]
fn upsert_existing_keeps_position() {
    let mut store = seed();
    let mut cto = store.get("2").unwrap().clone();
    cto.designation = "Chief Technology Officer".into();
    let previous = store.upsert(cto);
    assert_eq!(previous.unwrap().designation, "CTO");
    assert_eq!(ids(&store), vec!["1", "2", "3", "4"]);
    assert_eq!(store.get("2").unwrap().designation, "Chief Technology Officer");
}

#[test]
fn upsert_new_appends() {
    let mut store = seed();
    store.upsert(Employee::new("5", "someone", "engineer", "Engineering"));
    assert_eq!(ids(&store).last().map(String::as_str), Some("5"));
}

#[test]
fn remove_manager_orphans_reports() {
    let mut store = seed();
    let removed = store.remove("2").unwrap();
    assert_eq!(removed.name, "Pradeek J");
    assert_eq!(ids(&store), vec!["1", "3", "4"]);
    // Reports keep the dangling reference; nothing is auto-corrected.
    assert_eq!(store.get("3").unwrap().manager_id, Some(EmployeeId::new("2")));
}

#[test]
fn remove_unknown_is_noop() {
    let mut store = seed();
    let revision = store.revision();
    assert!(store.remove("42").is_none());
    assert_eq!(store.revision(), revision);
    assert_eq!(store.len(), 4);
}

#[test]
fn every_mutation_bumps_revision() {
    let mut store = EmployeeStore::new();
    let mut last = store.revision();
    store.upsert(Employee::new("1", "a", "b", "c"));
    assert!(store.revision() > last);
    last = store.revision();
    store.upsert(Employee::new("1", "a", "b", "d"));
    assert!(store.revision() > last);
    last = store.revision();
    store.remove("1");
    assert!(store.revision() > last);
}
