use std::path::PathBuf;

use thiserror::Error;

/// Why a single input line could not be turned into a record.
///
/// All variants are recovered by the loader: the line is skipped and
/// loading continues with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Skipping malformed line: expected at least {expected} fields, found {found}")]
    MalformedLine { expected: usize, found: usize },

    #[error("Error parsing {field} - invalid number format ({value:?}), skipping")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Error creating record from line, skipping: {0}")]
    Construction(String),
}

/// Recovered problems inside a guardian block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardianWarning {
    #[error("Guardians string format unexpected: {0}")]
    UnexpectedFormat(String),

    #[error("Malformed guardian info: {0}")]
    MalformedEntry(String),
}

/// A data file that could not be read at all.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path),
            _ => LoadError::Io { path, source },
        }
    }
}

/// Rejections from registry lookups, attendance transitions and room changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Student {0} not found")]
    StudentNotFound(String),

    #[error("Staff {0} not found")]
    StaffNotFound(String),

    #[error("Room {0} not found")]
    RoomNotFound(String),

    #[error("Room {0} is closed")]
    RoomClosed(String),

    #[error("Cannot add student {0} - student is not present")]
    NotPresent(String),

    #[error("Cannot add staff {0} - staff is not clocked in")]
    NotClockedIn(String),

    #[error("{person} is already in {room}")]
    AlreadyAssigned { person: String, room: String },

    #[error("Cannot add student {student} - room {room} is at capacity ({capacity} students)")]
    AtCapacity {
        student: String,
        room: String,
        capacity: u32,
    },

    #[error("Room {0} is already open")]
    AlreadyOpen(String),

    #[error("Room {0} is already closed")]
    AlreadyClosed(String),

    #[error("{0} is already present")]
    AlreadyPresent(String),

    #[error("{0} is already absent")]
    AlreadyAbsent(String),

    #[error("{0} is already clocked in")]
    AlreadyClockedIn(String),

    #[error("{0} is already clocked out")]
    AlreadyClockedOut(String),
}

/// A rejected room assignment.
///
/// The person is evicted from their previous room before the target room
/// validates them, and that eviction is not undone when the target rejects
/// them. `evicted_from` names the room they were removed from, if any.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct AssignError {
    pub reason: RegistryError,
    pub evicted_from: Option<String>,
}

impl From<RegistryError> for AssignError {
    fn from(reason: RegistryError) -> Self {
        Self {
            reason,
            evicted_from: None,
        }
    }
}
