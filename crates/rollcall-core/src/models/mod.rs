//! Data models for registry entities.
//!
//! - `Guardian`: pickup contact, plus the guardian-block parser
//! - `Student`, `Staff`: people with attendance / clock-in state
//! - `Room`: capacity, open/closed status and current occupants

pub mod guardian;
pub mod person;
pub mod room;

pub use guardian::{parse_guardians, Guardian, ParsedGuardians};
pub use person::{Staff, Student, NOT_CLOCKED_IN, UNASSIGNED};
pub use room::{Room, StaffId, StudentId};
