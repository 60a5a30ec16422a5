//! The OrgChart struct that ties the engine together.
//!
//! Owns the employee store, keeps the hierarchy index in step with it, and
//! routes every write through the reassignment validator. This is the
//! interface UI and transport collaborators call into: reads are pure
//! queries over the current snapshot, and every accepted write is applied
//! to the store and reindexed before the call returns.

use orgchart_hierarchy::{
    highlight_spans, search, team_members, team_summaries, HierarchyError, HierarchyIndex,
    HighlightSegment, LevelLayout, ReassignmentValidator, Rejection, ValidatorConfig,
};
use orgchart_protocol::{
    Employee, EmployeeId, EmployeePatch, NewEmployee, ReassignResult, TeamSummary,
    MAX_ID_GENERATION_ATTEMPTS,
};
use orgchart_state::{EmployeeStore, StateError};
use thiserror::Error;

use crate::config::OrgChartConfig;

/// Errors surfaced by the engine's write paths.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("Could not mint a unique employee ID after {0} attempts")]
    IdExhausted(u32),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl From<Rejection> for EngineError {
    fn from(rejection: Rejection) -> Self {
        Self::Hierarchy(HierarchyError::Rejected(rejection))
    }
}

/// Result of proposing a manager change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReassignmentOutcome {
    /// The store now holds the new manager reference.
    Applied { previous: Option<EmployeeId> },
    /// Accepted, but nothing needed to change (self-assignment, or the
    /// employee already reports there).
    Unchanged,
    /// Refused; the store is untouched.
    Rejected(Rejection),
}

impl ReassignmentOutcome {
    pub fn accepted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }

    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// User-facing message for a rejection.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Rejected(rejection) => Some(rejection.to_string()),
            _ => None,
        }
    }

    pub fn to_result(&self) -> ReassignResult {
        ReassignResult {
            accepted: self.accepted(),
            changed: self.changed(),
            message: self.message(),
        }
    }
}

/// The hierarchy engine facade.
#[derive(Debug, Clone, Default)]
pub struct OrgChart {
    store: EmployeeStore,
    index: HierarchyIndex,
    validator: ReassignmentValidator,
}

impl OrgChart {
    /// Create an empty chart.
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_store(EmployeeStore::new(), config)
    }

    /// Create a chart over an existing store.
    pub fn with_store(store: EmployeeStore, config: ValidatorConfig) -> Self {
        let index = HierarchyIndex::build(&store);
        Self {
            store,
            index,
            validator: ReassignmentValidator::new(config),
        }
    }

    /// Create a chart from configuration, loading the roster if one is set.
    pub fn from_config(config: &OrgChartConfig) -> Result<Self, EngineError> {
        let store = match &config.roster.path {
            Some(path) => orgchart_state::load_roster(path)?,
            None => {
                tracing::warn!("No roster configured, starting with an empty chart");
                EmployeeStore::new()
            }
        };
        tracing::info!(employees = store.len(), "Org chart ready");
        Ok(Self::with_store(store, config.validator_config()))
    }

    pub fn store(&self) -> &EmployeeStore {
        &self.store
    }

    pub fn index(&self) -> &HierarchyIndex {
        &self.index
    }

    pub fn validator(&self) -> &ReassignmentValidator {
        &self.validator
    }

    // ── Reads ──

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.store.get(id)
    }

    /// All employees in insertion order.
    pub fn get_all(&self) -> Vec<&Employee> {
        self.store.get_all()
    }

    pub fn direct_reports(&self, manager_id: &str) -> Vec<&Employee> {
        self.resolve(self.index.direct_reports(manager_id))
    }

    pub fn subordinate_closure(&self, manager_id: &str) -> Vec<&Employee> {
        self.resolve(self.index.subordinate_closure(manager_id))
    }

    /// Managers from the immediate one up to the root.
    pub fn ancestor_chain(&self, employee_id: &str) -> Vec<&Employee> {
        self.resolve(self.index.ancestor_chain(employee_id))
    }

    /// `None` for unknown employees.
    pub fn level_of(&self, employee_id: &str) -> Option<usize> {
        self.index.level_of(employee_id)
    }

    pub fn roots(&self) -> Vec<&Employee> {
        self.resolve(self.index.roots())
    }

    /// Employees whose manager reference names a removed employee.
    pub fn orphans(&self) -> Vec<&Employee> {
        self.resolve(self.index.orphans())
    }

    pub fn team_related_set(&self, team: &str) -> Vec<&Employee> {
        self.index.team_related_set(&self.store, team)
    }

    pub fn team_members(&self, team: &str) -> Vec<&Employee> {
        team_members(self.store.iter(), team)
    }

    pub fn team_summaries(&self) -> Vec<TeamSummary> {
        team_summaries(self.store.iter())
    }

    pub fn search(&self, query: &str) -> Vec<&Employee> {
        search(self.store.iter(), query)
    }

    pub fn highlight_spans<'a>(&self, text: &'a str, query: &str) -> Vec<HighlightSegment<'a>> {
        highlight_spans(text, query)
    }

    /// Level layout of the whole chart, or of one team's related set.
    pub fn layout(&self, team: Option<&str>) -> LevelLayout {
        match team {
            Some(team) => {
                let scope = self.team_related_set(team);
                LevelLayout::compute(&HierarchyIndex::from_employees(scope))
            }
            None => LevelLayout::compute(&self.index),
        }
    }

    /// Whether a manager change would pass the ordering rules.
    pub fn can_assign(&self, employee_id: &str, candidate_manager: Option<&str>) -> bool {
        self.validator
            .can_assign(&self.index, employee_id, candidate_manager)
    }

    // ── Writes ──

    /// Validate and, if accepted, apply a manager change.
    ///
    /// A rejection leaves the store untouched; callers surface its message.
    pub fn propose_reassignment(
        &mut self,
        employee_id: &str,
        candidate_manager: Option<&str>,
    ) -> ReassignmentOutcome {
        let candidate_manager = candidate_manager.filter(|m| !m.trim().is_empty());

        if let Err(rejection) =
            self.validator
                .check(&self.store, &self.index, employee_id, candidate_manager)
        {
            tracing::warn!(
                employee = employee_id,
                manager = ?candidate_manager,
                reason = %rejection,
                "Reassignment rejected"
            );
            return ReassignmentOutcome::Rejected(rejection);
        }

        let Some(current) = self.store.get(employee_id) else {
            return ReassignmentOutcome::Rejected(Rejection::UnknownEmployee {
                employee: employee_id.into(),
            });
        };

        if candidate_manager == Some(employee_id)
            || current.manager().map(EmployeeId::as_str) == candidate_manager
        {
            tracing::debug!(
                employee = employee_id,
                manager = ?candidate_manager,
                "Reassignment accepted without change"
            );
            return ReassignmentOutcome::Unchanged;
        }

        let mut updated = current.clone();
        let previous = updated.manager_id.clone();
        updated.set_manager(candidate_manager.map(EmployeeId::from));
        self.store.upsert(updated);
        self.refresh();

        tracing::info!(
            employee = employee_id,
            previous = ?previous,
            manager = ?candidate_manager,
            "Reassignment applied"
        );

        ReassignmentOutcome::Applied { previous }
    }

    /// Add an employee under a freshly minted identifier.
    pub fn create(&mut self, new: NewEmployee) -> Result<Employee, EngineError> {
        if let Some(manager) = new.manager_id.as_ref().filter(|m| !m.is_blank()) {
            let allow_unknown = self.validator.config().allow_unknown_managers;
            if !allow_unknown && !self.store.contains(manager.as_str()) {
                return Err(Rejection::UnknownManager {
                    manager: manager.clone(),
                }
                .into());
            }
        }

        let id = self.fresh_id()?;
        let employee = new.into_employee(id);
        self.store.upsert(employee.clone());
        self.refresh();

        tracing::info!(
            employee = %employee.id,
            team = %employee.team,
            manager = ?employee.manager_id,
            "Employee created"
        );

        Ok(employee)
    }

    /// Apply a partial update. A manager change is validated like
    /// `propose_reassignment`, but a refusal is returned as an error.
    pub fn update(&mut self, id: &str, patch: EmployeePatch) -> Result<Employee, EngineError> {
        let mut employee = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound(id.into()))?;

        if patch.is_empty() {
            return Ok(employee);
        }

        if let Some(manager) = &patch.manager_id {
            let candidate = manager
                .as_ref()
                .map(EmployeeId::as_str)
                .filter(|m| !m.trim().is_empty());
            self.validator
                .ensure(&self.store, &self.index, id, candidate)?;
            if candidate != Some(id) {
                employee.set_manager(candidate.map(EmployeeId::from));
            }
        }
        patch.apply_details(&mut employee);

        self.store.upsert(employee.clone());
        self.refresh();
        tracing::info!(employee = id, "Employee updated");

        Ok(employee)
    }

    /// Remove an employee. Their reports keep the now-dangling reference
    /// and are treated as roots until reassigned.
    pub fn remove(&mut self, id: &str) -> Option<Employee> {
        let orphaned = self.index.direct_reports(id).len();
        let removed = self.store.remove(id)?;
        self.refresh();
        tracing::info!(employee = id, orphaned, "Employee removed");
        Some(removed)
    }

    fn refresh(&mut self) {
        self.index = HierarchyIndex::build(&self.store);
    }

    fn fresh_id(&self) -> Result<EmployeeId, EngineError> {
        for _ in 0..MAX_ID_GENERATION_ATTEMPTS {
            let id = EmployeeId::generate();
            if !self.store.contains(id.as_str()) {
                return Ok(id);
            }
        }
        Err(EngineError::IdExhausted(MAX_ID_GENERATION_ATTEMPTS))
    }

    fn resolve<'a, I>(&self, ids: I) -> Vec<&Employee>
    where
        I: IntoIterator<Item = &'a EmployeeId>,
    {
        ids.into_iter()
            .filter_map(|id| self.store.get(id.as_str()))
            .collect()
    }
}
