//! Hierarchy index: O(1) lookups derived from a full scan of the store.
//!
//! For every employee whose manager reference resolves to another stored
//! employee, the employee is registered under that manager's children, in
//! store order. Everyone else is a root:
//! - no manager reference (absent, `null`, or blank)
//! - a dangling reference to an employee that is not stored (an orphan)
//! - a reference to itself
//!
//! The index never repairs the records it was built from. Dangling
//! references stay in the store; the index only decides how traversals
//! treat them.

use std::collections::{HashMap, HashSet};

use orgchart_protocol::{Employee, EmployeeId};
use orgchart_state::EmployeeStore;

/// Derived parent/children structure over a set of employees.
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    /// Store revision this index was built from; `None` for indexes over
    /// an ad-hoc subset of employees.
    revision: Option<u64>,
    /// Every indexed employee, in source order.
    order: Vec<EmployeeId>,
    /// Membership set over `order`.
    members: HashSet<EmployeeId>,
    /// Resolved manager of each non-root employee.
    parent: HashMap<EmployeeId, EmployeeId>,
    /// Manager -> reports, in source order.
    children: HashMap<EmployeeId, Vec<EmployeeId>>,
    roots: Vec<EmployeeId>,
    orphans: Vec<EmployeeId>,
}

impl HierarchyIndex {
    /// Build the index from the full store.
    pub fn build(store: &EmployeeStore) -> Self {
        let mut index = Self::from_employees(store.iter());
        index.revision = Some(store.revision());
        tracing::debug!(
            revision = store.revision(),
            employees = index.order.len(),
            roots = index.roots.len(),
            orphans = index.orphans.len(),
            "Hierarchy index rebuilt"
        );
        index
    }

    /// Build an index over an arbitrary set of employees.
    ///
    /// Manager references pointing outside the set are treated as dangling,
    /// so the set is laid out as a forest of its own.
    pub fn from_employees<'a, I>(employees: I) -> Self
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        let employees: Vec<&Employee> = employees.into_iter().collect();
        let mut index = Self::default();

        for employee in &employees {
            if index.members.contains(employee.id.as_str()) {
                continue;
            }
            index.members.insert(employee.id.clone());
            index.order.push(employee.id.clone());
        }

        // Only the first record per id is linked, matching `order`.
        let mut linked: HashSet<&str> = HashSet::with_capacity(employees.len());
        for employee in &employees {
            if !linked.insert(employee.id.as_str()) {
                continue;
            }
            match employee.manager() {
                Some(manager)
                    if manager != &employee.id && index.members.contains(manager.as_str()) =>
                {
                    index.parent.insert(employee.id.clone(), manager.clone());
                    index
                        .children
                        .entry(manager.clone())
                        .or_default()
                        .push(employee.id.clone());
                }
                Some(manager) => {
                    if manager != &employee.id {
                        tracing::debug!(
                            employee = %employee.id,
                            manager = %manager,
                            "Dangling manager reference, treating as root"
                        );
                        index.orphans.push(employee.id.clone());
                    } else {
                        tracing::debug!(
                            employee = %employee.id,
                            "Self-referencing manager, treating as root"
                        );
                    }
                    index.roots.push(employee.id.clone());
                }
                None => index.roots.push(employee.id.clone()),
            }
        }

        index
    }

    /// Whether the store has changed since this index was built.
    pub fn is_stale(&self, store: &EmployeeStore) -> bool {
        self.revision != Some(store.revision())
    }

    /// Store revision this index reflects, if it was built from a store.
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Whether an employee is part of the index.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Every indexed employee, in source order.
    pub fn ids(&self) -> &[EmployeeId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Employees without a resolvable manager, in source order.
    pub fn roots(&self) -> &[EmployeeId] {
        &self.roots
    }

    /// Employees whose manager reference names a missing employee.
    pub fn orphans(&self) -> &[EmployeeId] {
        &self.orphans
    }

    /// Direct reports of a manager, in source order.
    ///
    /// Empty if the manager has none or is unknown.
    pub fn direct_reports(&self, manager_id: &str) -> &[EmployeeId] {
        self.children
            .get(manager_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolved manager of an employee, `None` for roots and unknown ids.
    pub fn manager_of(&self, employee_id: &str) -> Option<&EmployeeId> {
        self.parent.get(employee_id)
    }

    /// Management chain from the immediate manager up to the topmost root.
    ///
    /// Stops at a root, or when an identifier repeats (a cycle seeded
    /// around the validator). Unknown ids yield an empty chain.
    pub fn ancestor_chain(&self, employee_id: &str) -> Vec<&EmployeeId> {
        let mut chain = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(employee_id);

        let mut current = employee_id;
        while let Some(manager) = self.parent.get(current) {
            if !visited.insert(manager.as_str()) {
                tracing::debug!(
                    employee = employee_id,
                    repeated = %manager,
                    "Cycle in manager chain, stopping walk"
                );
                break;
            }
            chain.push(manager);
            current = manager.as_str();
        }

        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(records: &[(&str, Option<&str>)]) -> EmployeeStore {
        records
            .iter()
            .map(|(id, manager)| {
                let employee = Employee::new(*id, *id, "role", "Team");
                match manager {
                    Some(m) => employee.with_manager(*m),
                    None => employee,
                }
            })
            .collect()
    }

    #[test]
    fn test_children_follow_store_order() {
        let s = store(&[("1", None), ("3", Some("1")), ("2", Some("1"))]);
        let index = HierarchyIndex::build(&s);
        let reports: Vec<&str> = index.direct_reports("1").iter().map(|e| e.as_str()).collect();
        assert_eq!(reports, vec!["3", "2"]);
    }

    #[test]
    fn test_dangling_and_self_reference_are_roots() {
        let s = store(&[("1", None), ("2", Some("ghost")), ("3", Some("3"))]);
        let index = HierarchyIndex::build(&s);
        let roots: Vec<&str> = index.roots().iter().map(|e| e.as_str()).collect();
        assert_eq!(roots, vec!["1", "2", "3"]);
        assert_eq!(index.orphans(), &[EmployeeId::new("2")]);
        assert!(index.direct_reports("3").is_empty());
    }

    #[test]
    fn test_staleness() {
        let mut s = store(&[("1", None)]);
        let index = HierarchyIndex::build(&s);
        assert!(!index.is_stale(&s));
        s.upsert(Employee::new("2", "2", "role", "Team"));
        assert!(index.is_stale(&s));
        assert!(HierarchyIndex::from_employees(s.iter()).is_stale(&s));
    }
}
