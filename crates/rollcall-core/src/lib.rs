//! Core library for rollcall.
//!
//! Holds the school registry: student, staff and room records, the
//! parsers that read them from comma-separated data files, and the rules
//! for attendance, clock-ins and room assignment.
//!
//! Nothing in this crate prints. Every operation returns a value describing
//! what happened, and the binary decides how to show it.

pub mod error;
pub mod loader;
pub mod models;
pub mod records;
pub mod registry;
pub mod utils;

pub use error::{AssignError, GuardianWarning, LoadError, RecordError, RegistryError};
pub use loader::{LineOutcome, LoadReport};
pub use models::{Guardian, Room, Staff, Student, NOT_CLOCKED_IN, UNASSIGNED};
pub use records::RecordKind;
pub use registry::{Closure, Placement, Registry, SearchResults};
