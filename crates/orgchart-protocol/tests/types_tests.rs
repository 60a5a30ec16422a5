//! Tests for the employee wire shape and method parameters.
//!
//! Verifies:
//! - Lossless round-trip of `{ id, name, designation, team, managerId?, avatar? }`
//! - Create and patch payload parsing
//! - Identifier parsing and generation

use orgchart_protocol::*;

// ═══════════════════════════════════════════════════════════════
// Employee wire shape
// ═══════════════════════════════════════════════════════════════

#[test]
fn employee_full_record_round_trips() {
    let json = serde_json::json!({
        "id": "3",
        "name": "person1",
        "designation": "engineer",
        "team": "Engineering",
        "managerId": "2",
        "avatar": "https://example.test/a.svg"
    });
    let employee: Employee = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(employee.id, EmployeeId::new("3"));
    assert_eq!(employee.manager_id, Some(EmployeeId::new("2")));
    assert_eq!(employee.avatar.as_deref(), Some("https://example.test/a.svg"));
    assert_eq!(serde_json::to_value(&employee).unwrap(), json);
}

#[test]
fn employee_without_optional_fields_round_trips() {
    let json = serde_json::json!({
        "id": "1",
        "name": "Shalin Jain",
        "designation": "CEO",
        "team": "Leadership"
    });
    let employee: Employee = serde_json::from_value(json.clone()).unwrap();
    assert!(employee.is_unmanaged());
    assert!(employee.avatar.is_none());
    assert_eq!(serde_json::to_value(&employee).unwrap(), json);
}

#[test]
fn employee_explicit_null_manager_is_preserved() {
    let json = serde_json::json!({
        "id": "1",
        "name": "Shalin Jain",
        "designation": "CEO",
        "team": "Leadership",
        "managerId": null
    });
    let employee: Employee = serde_json::from_value(json.clone()).unwrap();
    assert!(employee.manager_id.is_none());
    assert_eq!(serde_json::to_value(&employee).unwrap(), json);
}

#[test]
fn employee_ignores_unknown_fields() {
    let json = serde_json::json!({
        "id": "7",
        "name": "thing1",
        "designation": "designer",
        "team": "Design",
        "managerId": "2",
        "isDragging": true
    });
    let employee: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(employee.name, "thing1");
    let back = serde_json::to_value(&employee).unwrap();
    assert!(back.get("isDragging").is_none());
}

#[test]
fn employee_builder_matches_parsed_record() {
    let built = Employee::new("4", "person2", "engineer", "Engineering").with_manager("2");
    let parsed: Employee = serde_json::from_value(serde_json::json!({
        "id": "4",
        "name": "person2",
        "designation": "engineer",
        "team": "Engineering",
        "managerId": "2"
    }))
    .unwrap();
    assert_eq!(built, parsed);
}

// ═══════════════════════════════════════════════════════════════
// Create and patch payloads
// ═══════════════════════════════════════════════════════════════

#[test]
fn new_employee_into_employee_keeps_fields() {
    let new = NewEmployee::new("Ada", "engineer", "Engineering").with_manager("2");
    let employee = new.into_employee(EmployeeId::new("42"));
    assert_eq!(employee.id.as_str(), "42");
    assert_eq!(employee.name, "Ada");
    assert_eq!(employee.manager_id, Some(EmployeeId::new("2")));
}

#[test]
fn new_employee_without_manager_serializes_null() {
    let employee = NewEmployee::new("Ada", "CEO", "Leadership").into_employee("9".into());
    let json = serde_json::to_value(&employee).unwrap();
    assert!(json.get("managerId").unwrap().is_null());
}

#[test]
fn patch_distinguishes_missing_and_null() {
    let untouched: EmployeePatch = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
    assert_eq!(untouched.name.as_deref(), Some("Ada"));
    assert!(untouched.manager_id.is_none());

    let detach: EmployeePatch = serde_json::from_str(r#"{"managerId":null}"#).unwrap();
    assert_eq!(detach.manager_id, Some(None));

    let move_to: EmployeePatch = serde_json::from_str(r#"{"managerId":"8"}"#).unwrap();
    assert_eq!(move_to.manager_id, Some(Some(EmployeeId::new("8"))));
}

#[test]
fn patch_apply_details_leaves_manager_alone() {
    let mut employee = Employee::new("5", "someone", "engineer", "Engineering").with_manager("2");
    let patch = EmployeePatch {
        designation: Some("staff engineer".into()),
        avatar: Some(Some("a.png".into())),
        manager_id: Some(None),
        ..Default::default()
    };
    patch.apply_details(&mut employee);
    assert_eq!(employee.designation, "staff engineer");
    assert_eq!(employee.avatar.as_deref(), Some("a.png"));
    assert_eq!(employee.manager_id, Some(EmployeeId::new("2")));
}

#[test]
fn empty_patch_is_empty() {
    assert!(EmployeePatch::default().is_empty());
    let patch: EmployeePatch = serde_json::from_str("{}").unwrap();
    assert!(patch.is_empty());
}

// ═══════════════════════════════════════════════════════════════
// Identifiers
// ═══════════════════════════════════════════════════════════════

#[test]
fn employee_id_parse_trims_and_rejects_blank() {
    let id: EmployeeId = " 12 ".parse().unwrap();
    assert_eq!(id.as_str(), "12");
    assert!("   ".parse::<EmployeeId>().is_err());
}

#[test]
fn employee_id_generate_is_uuid_shaped() {
    let a = EmployeeId::generate();
    let b = EmployeeId::generate();
    assert_eq!(a.as_str().len(), 36);
    assert_ne!(a, b);
}

#[test]
fn employee_id_borrows_as_str_for_lookups() {
    use std::collections::HashMap;
    let mut map = HashMap::new();
    map.insert(EmployeeId::new("1"), "root");
    assert_eq!(map.get("1"), Some(&"root"));
}

#[test]
fn employee_id_serializes_transparently() {
    let id = EmployeeId::new("abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
}
