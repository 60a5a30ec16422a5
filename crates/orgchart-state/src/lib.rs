//! Org-chart State - the employee store the hierarchy engine operates over
//!
//! Provides:
//! - An insertion-ordered, identifier-keyed store with a mutation revision
//! - Roster parsing from bare-array or `{ "employees": [...] }` JSON

pub mod roster;
pub mod store;

pub use roster::{load_roster, load_roster_str, parse_roster, roster_to_json, store_from_employees};
pub use store::EmployeeStore;

use thiserror::Error;

/// Errors originating from the state layer.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Duplicate employee ID: {0}")]
    DuplicateEmployee(String),

    #[error("Could not read roster {path}: {source}")]
    RosterIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid roster: {0}")]
    RosterFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
