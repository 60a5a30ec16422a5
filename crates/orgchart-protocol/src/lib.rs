//! Org-chart protocol - core types and request envelopes
//!
//! Defines the employee record exactly as transports exchange it, the
//! identifiers the hierarchy engine keys on, and the JSON-RPC 2.0 style
//! envelope used to call the engine through a single dispatcher.

pub mod identity;
pub mod messages;
pub mod types;
pub mod error;
pub mod constants;

pub use identity::*;
pub use messages::*;
pub use types::*;
pub use error::*;
pub use constants::*;
