//! Org chart engine: the facade, request dispatch and configuration.
//!
//! Ties the lower crates together:
//! - State (employee store, roster loading)
//! - Hierarchy (index, traversal, validation, layout, search)
//!
//! The `OrgChart` facade is the only path that mutates the store, and
//! every manager change goes through the reassignment validator. The
//! dispatcher exposes the facade as JSON-RPC 2.0 methods for whatever
//! transport a host wires up.

pub mod config;
pub mod dispatch;
pub mod engine;

pub use config::OrgChartConfig;
pub use dispatch::{dispatch, process_request, serve};
pub use engine::{EngineError, OrgChart, ReassignmentOutcome};
