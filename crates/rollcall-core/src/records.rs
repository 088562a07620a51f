//! Line-level record parsing.
//!
//! Each data file holds one record per line with comma-separated fields and
//! no quoting. This module turns a single line into a `Student`, `Staff` or
//! `Room`, reporting exactly why a line was rejected.

use std::str::FromStr;

use crate::error::{GuardianWarning, RecordError};
use crate::models::{parse_guardians, Room, Staff, Student};
use crate::utils::split_fields;

pub const MIN_STUDENT_FIELDS: usize = 7;
pub const MIN_STAFF_FIELDS: usize = 3;
pub const MIN_ROOM_FIELDS: usize = 2;

/// Which kind of record a data file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Student,
    Staff,
    Room,
}

impl RecordKind {
    /// Plural noun used in load summaries ("Finished loading 3 students.").
    pub fn plural(&self) -> &'static str {
        match self {
            RecordKind::Student => "students",
            RecordKind::Staff => "staff",
            RecordKind::Room => "rooms",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Student => write!(f, "student"),
            RecordKind::Staff => write!(f, "staff"),
            RecordKind::Room => write!(f, "room"),
        }
    }
}

/// A student line together with any guardian-block problems that were
/// patched over while reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub student: Student,
    pub warnings: Vec<GuardianWarning>,
}

fn require_fields(fields: &[&str], expected: usize) -> Result<(), RecordError> {
    if fields.len() < expected {
        return Err(RecordError::MalformedLine {
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_name(value: &str) -> Result<String, RecordError> {
    if value.is_empty() {
        return Err(RecordError::Construction("name is empty".to_string()));
    }
    Ok(value.to_string())
}

/// `name,grade,gender,guardians,allergies,needsPara,meds`
pub fn parse_student(line: &str) -> Result<StudentRecord, RecordError> {
    let fields = split_fields(line, ',');
    require_fields(&fields, MIN_STUDENT_FIELDS)?;

    let name = parse_name(fields[0])?;
    let grade = parse_number("grade", fields[1])?;
    let guardians = parse_guardians(fields[3]);
    let needs_para = fields[5].eq_ignore_ascii_case("yes");

    Ok(StudentRecord {
        student: Student::new(
            name,
            grade,
            fields[2],
            guardians.guardians,
            fields[4],
            needs_para,
            fields[6],
        ),
        warnings: guardians.warnings,
    })
}

/// `name,position,shift[,email]`
pub fn parse_staff(line: &str) -> Result<Staff, RecordError> {
    let fields = split_fields(line, ',');
    require_fields(&fields, MIN_STAFF_FIELDS)?;

    let name = parse_name(fields[0])?;
    let email = fields.get(3).copied().unwrap_or_default();
    Ok(Staff::new(name, fields[1], fields[2], email))
}

/// `name,studentCapacity`
pub fn parse_room(line: &str) -> Result<Room, RecordError> {
    let fields = split_fields(line, ',');
    require_fields(&fields, MIN_ROOM_FIELDS)?;

    let name = parse_name(fields[0])?;
    let capacity = parse_number("capacity", fields[1])?;
    Ok(Room::new(name, capacity))
}
