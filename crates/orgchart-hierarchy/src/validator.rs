//! Reassignment validation: the single gate every manager change passes.
//!
//! Rules, evaluated in order against the current store state:
//! 1. No candidate manager: always valid (detaching to root).
//! 2. Candidate is the employee itself: valid as a no-op, unless the
//!    validator is configured to reject self-assignment.
//! 3. Candidate is in the employee's subordinate closure: rejected, since
//!    the new edge would close a reporting loop.
//!
//! `check` layers existence checks on top of the pure rules so that
//! accepted writes never create dangling references.

use orgchart_protocol::{EmployeeId, CIRCULAR_REPORTING_MESSAGE};
use orgchart_state::EmployeeStore;
use serde::Serialize;
use thiserror::Error;

use crate::index::HierarchyIndex;
use crate::HierarchyError;

/// Configuration for the reassignment validator.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    /// Reject `employee -> itself` instead of accepting it as a no-op.
    pub reject_self_assignment: bool,
    /// Accept candidate managers that are not in the store.
    pub allow_unknown_managers: bool,
}

/// Why a proposed reassignment was refused.
///
/// This is an expected outcome of normal use, reported as a value.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("Employee not found: {employee}")]
    UnknownEmployee { employee: EmployeeId },

    #[error("Manager not found: {manager}")]
    UnknownManager { manager: EmployeeId },

    #[error("{}", CIRCULAR_REPORTING_MESSAGE)]
    CircularReporting {
        employee: EmployeeId,
        manager: EmployeeId,
    },

    #[error("Invalid assignment: {employee} cannot report to themselves")]
    SelfAssignment { employee: EmployeeId },
}

/// Validates proposed manager changes.
#[derive(Debug, Clone, Default)]
pub struct ReassignmentValidator {
    config: ValidatorConfig,
}

impl ReassignmentValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The three ordering rules, with no existence checks.
    pub fn can_assign(
        &self,
        index: &HierarchyIndex,
        employee_id: &str,
        candidate_manager: Option<&str>,
    ) -> bool {
        self.check_rules(index, employee_id, candidate_manager).is_ok()
    }

    /// Full write gate: existence checks, then the ordering rules.
    ///
    /// A stale index is never trusted; the rules are then evaluated
    /// against a fresh index built from `store`.
    pub fn check(
        &self,
        store: &EmployeeStore,
        index: &HierarchyIndex,
        employee_id: &str,
        candidate_manager: Option<&str>,
    ) -> Result<(), Rejection> {
        let candidate_manager = candidate_manager.filter(|m| !m.trim().is_empty());

        if !store.contains(employee_id) {
            return Err(Rejection::UnknownEmployee {
                employee: employee_id.into(),
            });
        }

        if let Some(manager) = candidate_manager {
            if manager != employee_id
                && !self.config.allow_unknown_managers
                && !store.contains(manager)
            {
                return Err(Rejection::UnknownManager {
                    manager: manager.into(),
                });
            }
        }

        if index.is_stale(store) {
            tracing::debug!(
                employee = employee_id,
                "Index is stale, validating against a fresh one"
            );
            let fresh = HierarchyIndex::build(store);
            return self.check_rules(&fresh, employee_id, candidate_manager);
        }

        self.check_rules(index, employee_id, candidate_manager)
    }

    /// `check`, lifted into the hierarchy error type for `?` call sites.
    pub fn ensure(
        &self,
        store: &EmployeeStore,
        index: &HierarchyIndex,
        employee_id: &str,
        candidate_manager: Option<&str>,
    ) -> Result<(), HierarchyError> {
        Ok(self.check(store, index, employee_id, candidate_manager)?)
    }

    fn check_rules(
        &self,
        index: &HierarchyIndex,
        employee_id: &str,
        candidate_manager: Option<&str>,
    ) -> Result<(), Rejection> {
        let Some(manager) = candidate_manager else {
            return Ok(());
        };

        if manager == employee_id {
            if self.config.reject_self_assignment {
                return Err(Rejection::SelfAssignment {
                    employee: employee_id.into(),
                });
            }
            return Ok(());
        }

        if index.is_subordinate(employee_id, manager) {
            return Err(Rejection::CircularReporting {
                employee: employee_id.into(),
                manager: manager.into(),
            });
        }

        Ok(())
    }
}
