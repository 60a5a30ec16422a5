//! Level-by-level layout: which employees sit on which tier of the chart.
//!
//! Roots are laid out in source order; under each root the walk is
//! depth-first, so every level lists its members in the order a
//! renderer should place them left to right. Coordinates and styling are
//! left to the renderer.
//!
//! Members of a cycle that was seeded around the validator cannot be
//! reached from any root. The first of them in source order is promoted
//! to a pseudo-root at level 0, so every employee appears exactly once.

use std::collections::HashSet;

use orgchart_protocol::EmployeeId;
use serde::Serialize;

use crate::index::HierarchyIndex;

/// A manager -> report edge drawn between two laid-out employees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReportingEdge {
    pub manager: EmployeeId,
    pub report: EmployeeId,
}

/// Result of a layout computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelLayout {
    /// Employees on each level (index 0 = roots).
    pub levels: Vec<Vec<EmployeeId>>,
    /// Reporting edges, in walk order.
    pub edges: Vec<ReportingEdge>,
    /// Employees promoted to level 0 because no root reaches them.
    pub pseudo_roots: Vec<EmployeeId>,
}

impl LevelLayout {
    /// Lay out every employee in the index.
    pub fn compute(index: &HierarchyIndex) -> Self {
        let mut layout = Self::default();
        let mut visited: HashSet<&str> = HashSet::with_capacity(index.len());

        for root in index.roots() {
            layout.walk(index, root, &mut visited);
        }

        for id in index.ids() {
            if !visited.contains(id.as_str()) {
                tracing::debug!(employee = %id, "Unreachable from any root, promoting to pseudo-root");
                layout.pseudo_roots.push(id.clone());
                layout.walk(index, id, &mut visited);
            }
        }

        layout
    }

    /// Depth-first walk from `start`, placing it on level 0.
    fn walk<'a>(
        &mut self,
        index: &'a HierarchyIndex,
        start: &'a EmployeeId,
        visited: &mut HashSet<&'a str>,
    ) {
        let mut stack: Vec<(&EmployeeId, usize, Option<&EmployeeId>)> = vec![(start, 0, None)];

        while let Some((id, level, manager)) = stack.pop() {
            if !visited.insert(id.as_str()) {
                continue;
            }
            if self.levels.len() <= level {
                self.levels.resize_with(level + 1, Vec::new);
            }
            self.levels[level].push(id.clone());

            if let Some(manager) = manager {
                self.edges.push(ReportingEdge {
                    manager: manager.clone(),
                    report: id.clone(),
                });
            }

            for report in index.direct_reports(id.as_str()).iter().rev() {
                if !visited.contains(report.as_str()) {
                    stack.push((report, level + 1, Some(id)));
                }
            }
        }
    }

    /// Level an employee was placed on.
    pub fn level_of(&self, employee_id: &str) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|id| id.as_str() == employee_id))
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Total number of employees laid out.
    pub fn node_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}
