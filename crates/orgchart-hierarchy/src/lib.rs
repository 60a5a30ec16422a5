//! Org-chart Hierarchy - the engine that keeps the reporting forest valid
//!
//! Operates over the employee store and provides:
//! - A derived index of children, roots and resolved managers
//! - Reassignment validation that keeps the forest acyclic
//! - Traversals: subordinate closure, ancestor chain, level, team scope
//! - Level-by-level layout of the chart
//! - Case-insensitive search with highlight spans, and team grouping
//!
//! Malformed data (dangling or cyclic manager references) never makes a
//! query fail or loop: dangling and cyclic nodes are treated as roots.

pub mod index;
pub mod layout;
pub mod search;
pub mod teams;
pub mod traversal;
pub mod validator;

pub use index::HierarchyIndex;
pub use layout::{LevelLayout, ReportingEdge};
pub use search::{highlight_spans, search, HighlightSegment};
pub use teams::{team_members, team_summaries};
pub use validator::{ReassignmentValidator, Rejection, ValidatorConfig};

use thiserror::Error;

/// Errors originating from the hierarchy layer.
#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
}
