//! Traversal queries over the hierarchy index.
//!
//! All walks are iterative and guarded by a visited set, so they terminate
//! on deep hierarchies and on cycles that were seeded around the validator.

use std::collections::HashSet;

use orgchart_protocol::{Employee, EmployeeId, ROOT_LEVEL};
use orgchart_state::EmployeeStore;

use crate::index::HierarchyIndex;
use crate::layout::LevelLayout;

impl HierarchyIndex {
    /// Every transitive report of a manager, depth-first pre-order.
    ///
    /// Each employee appears once, and the manager itself never appears,
    /// even if malformed data loops back to it.
    pub fn subordinate_closure(&self, manager_id: &str) -> Vec<&EmployeeId> {
        let mut closure = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(manager_id);

        let mut stack: Vec<&EmployeeId> = self.direct_reports(manager_id).iter().rev().collect();
        while let Some(next) = stack.pop() {
            if !visited.insert(next.as_str()) {
                continue;
            }
            closure.push(next);
            stack.extend(self.direct_reports(next.as_str()).iter().rev());
        }

        closure
    }

    /// Whether `candidate` sits anywhere below `manager_id`.
    pub fn is_subordinate(&self, manager_id: &str, candidate: &str) -> bool {
        self.subordinate_closure(manager_id)
            .iter()
            .any(|id| id.as_str() == candidate)
    }

    /// Distance from the nearest root; roots are level 0.
    ///
    /// An employee whose chain never reaches a root (it runs into a
    /// seeded cycle) gets the level the layout places it on, counted from
    /// the pseudo-root its walk starts at. Returns `None` for employees
    /// that are not indexed.
    pub fn level_of(&self, employee_id: &str) -> Option<usize> {
        if !self.contains(employee_id) {
            return None;
        }

        let chain = self.ancestor_chain(employee_id);
        let reaches_root = chain
            .last()
            .map_or(true, |top| self.manager_of(top.as_str()).is_none());
        if reaches_root {
            return Some(ROOT_LEVEL + chain.len());
        }

        LevelLayout::compute(self).level_of(employee_id)
    }

    /// A team's members plus everyone organizationally connected to them:
    /// each member's full management chain and full subordinate closure.
    ///
    /// Team names match exactly. The result is a set, returned in store
    /// order.
    pub fn team_related_set<'s>(&self, store: &'s EmployeeStore, team: &str) -> Vec<&'s Employee> {
        let mut related: HashSet<&str> = HashSet::new();

        for member in store.iter().filter(|e| e.team == team) {
            related.insert(member.id.as_str());
            related.extend(self.ancestor_chain(member.id.as_str()).into_iter().map(EmployeeId::as_str));
            related.extend(self.subordinate_closure(member.id.as_str()).into_iter().map(EmployeeId::as_str));
        }

        store
            .iter()
            .filter(|e| related.contains(e.id.as_str()))
            .collect()
    }
}
