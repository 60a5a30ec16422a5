use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::EmployeeId;

/// How an employee record without a manager spelled that on the wire.
///
/// Both forms mean "root"; the distinction is kept so records round-trip
/// byte-for-byte through the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RootMarker {
    /// The `managerId` key was omitted.
    #[default]
    Absent,
    /// The `managerId` key was present with a `null` value.
    Null,
}

/// An employee: one node of the organizational forest.
///
/// The manager reference is the only edge of the graph. `None` means the
/// employee is a root. A reference naming a missing employee is tolerated
/// and treated as root-like by every traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EmployeeRecord", into = "EmployeeRecord")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub designation: String,
    pub team: String,
    /// Opaque avatar reference, never interpreted by the engine.
    pub avatar: Option<String>,
    pub manager_id: Option<EmployeeId>,
    root_marker: RootMarker,
}

impl Employee {
    pub fn new(
        id: impl Into<EmployeeId>,
        name: impl Into<String>,
        designation: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            designation: designation.into(),
            team: team.into(),
            avatar: None,
            manager_id: None,
            root_marker: RootMarker::Absent,
        }
    }

    pub fn with_manager(mut self, manager_id: impl Into<EmployeeId>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Replace the manager reference.
    ///
    /// Clearing the reference records an explicit `null`, which is what a
    /// detach looks like on the wire.
    pub fn set_manager(&mut self, manager_id: Option<EmployeeId>) {
        if manager_id.is_none() {
            self.root_marker = RootMarker::Null;
        }
        self.manager_id = manager_id;
    }

    /// The manager reference, with blank identifiers treated as absent.
    pub fn manager(&self) -> Option<&EmployeeId> {
        self.manager_id.as_ref().filter(|m| !m.is_blank())
    }

    /// Whether this record names no manager at all.
    pub fn is_unmanaged(&self) -> bool {
        self.manager().is_none()
    }
}

/// The exact record shape exchanged with transports:
/// `{ id, name, designation, team, managerId?: string|null, avatar?: string }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeRecord {
    id: EmployeeId,
    name: String,
    designation: String,
    team: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "nullable"
    )]
    manager_id: Option<Option<EmployeeId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        let (manager_id, root_marker) = match record.manager_id {
            None => (None, RootMarker::Absent),
            Some(None) => (None, RootMarker::Null),
            Some(Some(id)) => (Some(id), RootMarker::Absent),
        };
        Self {
            id: record.id,
            name: record.name,
            designation: record.designation,
            team: record.team,
            avatar: record.avatar,
            manager_id,
            root_marker,
        }
    }
}

impl From<Employee> for EmployeeRecord {
    fn from(employee: Employee) -> Self {
        let manager_id = match (employee.manager_id, employee.root_marker) {
            (Some(id), _) => Some(Some(id)),
            (None, RootMarker::Null) => Some(None),
            (None, RootMarker::Absent) => None,
        };
        Self {
            id: employee.id,
            name: employee.name,
            designation: employee.designation,
            team: employee.team,
            manager_id,
            avatar: employee.avatar,
        }
    }
}

/// Deserialize a field that distinguishes "missing" (outer `None`, via
/// `#[serde(default)]`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Payload for creating an employee: every field except the identifier,
/// which the engine assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub designation: String,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
}

impl NewEmployee {
    pub fn new(
        name: impl Into<String>,
        designation: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            designation: designation.into(),
            team: team.into(),
            avatar: None,
            manager_id: None,
        }
    }

    pub fn with_manager(mut self, manager_id: impl Into<EmployeeId>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    /// Attach an identifier, producing a full record.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        let mut employee = Employee::new(id, self.name, self.designation, self.team);
        employee.avatar = self.avatar;
        employee.set_manager(self.manager_id);
        employee
    }
}

/// Partial update of an employee record.
///
/// Outer `None` leaves a field untouched. For `avatar` and `manager_id`,
/// `Some(None)` clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub avatar: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub manager_id: Option<Option<EmployeeId>>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.designation.is_none()
            && self.team.is_none()
            && self.avatar.is_none()
            && self.manager_id.is_none()
    }

    /// Apply every field except the manager reference, which must go
    /// through reassignment validation.
    pub fn apply_details(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(designation) = &self.designation {
            employee.designation = designation.clone();
        }
        if let Some(team) = &self.team {
            employee.team = team.clone();
        }
        if let Some(avatar) = &self.avatar {
            employee.avatar = avatar.clone();
        }
    }
}

/// Headcount of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    pub count: usize,
}
