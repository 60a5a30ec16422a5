//! In-memory employee store: the ground truth the hierarchy engine reads.
//!
//! Records are keyed by identifier and kept in insertion order, so every
//! listing (and every children list derived from it) is stable across
//! reads. The store performs no validation; whoever orchestrates writes
//! is expected to consult the reassignment validator first.
//!
//! Every mutation bumps a revision counter. Derived structures remember
//! the revision they were built from and are stale once it moves on.

use indexmap::IndexMap;

use orgchart_protocol::{Employee, EmployeeId};

/// Ordered, identifier-keyed collection of employee records.
#[derive(Debug, Clone, Default)]
pub struct EmployeeStore {
    employees: IndexMap<EmployeeId, Employee>,
    revision: u64,
}

impl EmployeeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record by identifier.
    ///
    /// Returns `None` if no employee has this id.
    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    /// Check if an employee exists.
    pub fn contains(&self, id: &str) -> bool {
        self.employees.contains_key(id)
    }

    /// All records in insertion order.
    pub fn get_all(&self) -> Vec<&Employee> {
        self.employees.values().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> + '_ {
        self.employees.values()
    }

    /// Owned copies of all records, in insertion order.
    pub fn to_vec(&self) -> Vec<Employee> {
        self.employees.values().cloned().collect()
    }

    /// Insert a record or replace the one with the same id.
    ///
    /// A replaced record keeps its original position. Returns the previous
    /// record, if any.
    pub fn upsert(&mut self, employee: Employee) -> Option<Employee> {
        self.revision += 1;
        self.employees.insert(employee.id.clone(), employee)
    }

    /// Remove a record, preserving the order of the rest.
    ///
    /// Reports of the removed employee are left untouched: their manager
    /// reference now dangles. Returns `None` (and leaves the revision
    /// alone) if the id is unknown.
    pub fn remove(&mut self, id: &str) -> Option<Employee> {
        let removed = self.employees.shift_remove(id);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Monotonic mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl FromIterator<Employee> for EmployeeStore {
    /// Build a store from records; later duplicates replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        let mut store = Self::new();
        for employee in iter {
            store.upsert(employee);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str) -> Employee {
        Employee::new(id, format!("name-{id}"), "engineer", "Engineering")
    }

    #[test]
    fn test_upsert_and_get() {
        let mut store = EmployeeStore::new();
        assert!(store.upsert(employee("1")).is_none());
        assert!(store.contains("1"));
        assert_eq!(store.get("1").map(|e| e.name.as_str()), Some("name-1"));
        assert!(store.get("2").is_none());
    }

    #[test]
    fn test_revision_tracks_mutations() {
        let mut store = EmployeeStore::new();
        assert_eq!(store.revision(), 0);
        store.upsert(employee("1"));
        assert_eq!(store.revision(), 1);
        assert!(store.remove("missing").is_none());
        assert_eq!(store.revision(), 1);
        store.remove("1");
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut store: EmployeeStore = ["1", "2", "3"].into_iter().map(employee).collect();
        store.remove("2");
        let ids: Vec<&str> = store.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
