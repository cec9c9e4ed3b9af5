//! # Mission Control Core Types
//!
//! Layer 0 of the workspace: the record types every other crate speaks in, plus
//! the mission lifecycle table. No I/O and no knowledge of storage or HTTP.

pub mod enums;
pub mod error;
pub mod lifecycle;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{CrewStatus, MissionPriority, MissionStatus};
pub use error::CoreError;
pub use lifecycle::{MissionAction, apply_action, can_transition};
pub use structs::{CrewRecord, MissionDate, MissionRecord, RecordId};
