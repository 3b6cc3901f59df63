//! Store abstraction for schedule data.
//!
//! The core reads classes, time slots, and selections through the
//! [`ScheduleStore`] trait so backends can be swapped. [`InMemoryStore`] is
//! the in-process implementation used by tests and local development; the
//! hosted backend lives behind the same trait out of tree.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for store operations
//! - [`schedule_store`]: The trait the core consumes
//! - [`memory`]: In-memory implementation

pub mod error;
pub mod memory;
pub mod schedule_store;

// Re-export error types
pub use error::{ErrorContext, StoreError, StoreResult};

pub use memory::InMemoryStore;
pub use schedule_store::ScheduleStore;
