//! # Mission Control Storage Crate
//!
//! The record store the rest of the application reads missions and crew from.
//!
//! ## Architectural Principles
//!
//! - **Adapter Layer:** `MissionRepository` and `CrewRepository` are the narrow
//!   interfaces (`list`, `get_by_id`) the HTTP layer depends on. Swapping the
//!   in-memory implementation for a real database touches nothing else.
//! - **Caller-Owned State:** there is no process-wide datastore. Whoever builds an
//!   `InMemoryRepository` owns it and passes it where it is needed.
//!
//! ## Public API
//!
//! - `InMemoryRepository`: a lock-guarded store seeded from sample data or JSON files.
//! - `fixtures`: the sample records and the JSON loaders.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod fixtures;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::DbError;
pub use repository::{CrewRepository, InMemoryRepository, MissionRepository};
