//! # Mission Control Analytics
//!
//! Derives aggregate statistics and per-record fields from a snapshot of
//! missions and crew members.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It depends only on `core-types`.
//! - **Stateless Calculation:** `StatsEngine` takes a borrowed slice of records and
//!   returns freshly computed values. It never fails: zero denominators fall back to
//!   0 and unparseable dates count as a zero duration for the affected record.
//!
//! ## Public API
//!
//! - `StatsEngine`: statistics, durations, filters and lookups.
//! - `MissionStats` / `PriorityDistribution`: the aggregate report.
//! - `AnalyticsError`: per-record failures surfaced by `mission_duration_ms`.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatsEngine;
pub use error::AnalyticsError;
pub use report::{MissionStats, PriorityDistribution};
