//! Roster loading: seed a store from the JSON a transport hands over.
//!
//! Two document shapes are accepted:
//! - a bare array of employee records
//! - an envelope object `{ "employees": [...] }`
//!
//! Identifiers must be unique within a roster.

use std::collections::HashSet;
use std::path::Path;

use orgchart_protocol::{Employee, ROSTER_ENVELOPE_KEY};

use crate::store::EmployeeStore;
use crate::StateError;

/// Parse a roster document into records, in document order.
pub fn parse_roster(json: &str) -> Result<Vec<Employee>, StateError> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    let records = match document {
        serde_json::Value::Array(_) => document,
        serde_json::Value::Object(mut map) => match map.remove(ROSTER_ENVELOPE_KEY) {
            Some(records) => records,
            None => {
                return Err(StateError::RosterFormat(format!(
                    "expected an array or an object with an \"{ROSTER_ENVELOPE_KEY}\" key"
                )))
            }
        },
        other => {
            return Err(StateError::RosterFormat(format!(
                "expected an array or object, got {}",
                json_kind(&other)
            )))
        }
    };
    Ok(serde_json::from_value(records)?)
}

/// Build a store from records, rejecting duplicate identifiers.
pub fn store_from_employees(employees: Vec<Employee>) -> Result<EmployeeStore, StateError> {
    let mut seen = HashSet::with_capacity(employees.len());
    for employee in &employees {
        if !seen.insert(employee.id.as_str()) {
            return Err(StateError::DuplicateEmployee(employee.id.to_string()));
        }
    }
    Ok(employees.into_iter().collect())
}

/// Parse a roster document straight into a store.
pub fn load_roster_str(json: &str) -> Result<EmployeeStore, StateError> {
    store_from_employees(parse_roster(json)?)
}

/// Read and parse a roster file.
pub fn load_roster(path: &Path) -> Result<EmployeeStore, StateError> {
    let content = std::fs::read_to_string(path).map_err(|source| StateError::RosterIo {
        path: path.display().to_string(),
        source,
    })?;
    let store = load_roster_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        employees = store.len(),
        "Roster loaded"
    );
    Ok(store)
}

/// Serialize the store as a bare array roster, in insertion order.
pub fn roster_to_json(store: &EmployeeStore) -> Result<String, StateError> {
    Ok(serde_json::to_string_pretty(&store.get_all())?)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
