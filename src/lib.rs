//! # STS Rust
//!
//! Scheduling core for a school timetable selection system.
//!
//! This crate implements the schedule logic behind a weekly class
//! timetable: grouping classes into a day/time-slot grid, classifying
//! time slots by catalog name, resolving double lessons across
//! consecutive slots, detecting selection conflicts, and tracking
//! per-owner selection state with refresh-after-write semantics.
//! Persistence and authentication live behind the [`store`] trait; any
//! backend that implements it plugs in.
//!
//! ## Features
//!
//! - **Weekly grid**: derive a day → time-slot → classes projection from
//!   a flat class list
//! - **Conflict detection**: find every selected class occupying a
//!   candidate's day and slot
//! - **Slot catalog**: classify slots as lesson/break/meeting by name,
//!   configurable from TOML
//! - **Double lessons**: resolve the next consecutive slot and the
//!   combined time range
//! - **Selection tracking**: per-owner caches wrapping select/unselect
//!   with unconditional re-fetch
//! - **Hebrew display labels**: day names, grade names, RTL time ranges
//!
//! ## Architecture
//!
//! - [`api`]: core record shapes (slots, classes, selections, the grid)
//! - [`models`]: wall-clock time newtype and dataset snapshot ingestion
//! - [`catalog`]: slot name classification and selectability
//! - [`session`]: roles and the predicates gating mutations
//! - [`store`]: async store trait, error types, in-memory implementation
//! - [`services`]: grid building, conflicts, slot sequencing, display
//!   labels, selection tracking

pub mod api;
pub mod catalog;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
