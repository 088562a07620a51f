//! The in-memory registry and room-assignment engine.
//!
//! `Registry` owns every student, staff member and room for the life of the
//! process. Each collection keeps insertion order for display and a
//! case-insensitive name index for lookup. Rooms refer to their occupants by
//! id, and every room change keeps both sides in step: a person listed in a
//! room always has that room as their location, and appears in at most one
//! room.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{AssignError, RecordError, RegistryError};
use crate::models::{Room, Staff, StaffId, Student, StudentId, UNASSIGNED};
use crate::utils::{contains_ignore_case, name_key};

// ============================================================================
// Indexed collections
// ============================================================================

/// Anything stored in a [`Roster`] is keyed by its display name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Student {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Staff {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Room {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered list plus a `name_key` -> position index.
#[derive(Debug, Clone)]
struct Roster<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> Roster<T> {
    fn insert(&mut self, item: T) -> Result<usize, RecordError> {
        let key = name_key(item.name());
        if self.index.contains_key(&key) {
            return Err(RecordError::Construction(format!(
                "duplicate name {}",
                item.name()
            )));
        }
        let position = self.items.len();
        self.items.push(item);
        self.index.insert(key, position);
        Ok(position)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&name_key(name)).copied()
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.position(name).map(|i| &self.items[i])
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// A successful room assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub person: String,
    pub room: String,
    /// Room the person was removed from to make the move, if any.
    pub evicted_from: Option<String>,
}

/// Everyone removed when a room was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Closure {
    pub room: String,
    pub students: Vec<String>,
    pub staff: Vec<String>,
}

/// Matches for a free-text search.
#[derive(Debug, Default)]
pub struct SearchResults<'a> {
    pub students: Vec<&'a Student>,
    pub staff: Vec<&'a Staff>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.staff.is_empty()
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Registry {
    students: Roster<Student>,
    staff: Roster<Staff>,
    rooms: Roster<Room>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Add a student. A name already in the registry (any case) is rejected.
    pub fn add_student(&mut self, student: Student) -> Result<StudentId, RecordError> {
        self.students.insert(student).map(StudentId)
    }

    pub fn add_staff(&mut self, staff: Staff) -> Result<StaffId, RecordError> {
        self.staff.insert(staff).map(StaffId)
    }

    pub fn add_room(&mut self, room: Room) -> Result<(), RecordError> {
        self.rooms.insert(room).map(|_| ())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn student(&self, name: &str) -> Option<&Student> {
        self.students.get(name)
    }

    pub fn staff_member(&self, name: &str) -> Option<&Staff> {
        self.staff.get(name)
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.items.iter()
    }

    pub fn staff(&self) -> impl Iterator<Item = &Staff> {
        self.staff.items.iter()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.items.iter()
    }

    /// Students currently seated in `room`, in the order they were added.
    pub fn room_students<'a>(&'a self, room: &'a Room) -> impl Iterator<Item = &'a Student> + 'a {
        room.students.iter().map(|id| &self.students.items[id.0])
    }

    pub fn room_staff<'a>(&'a self, room: &'a Room) -> impl Iterator<Item = &'a Staff> + 'a {
        room.staff.iter().map(|id| &self.staff.items[id.0])
    }

    /// Case-insensitive search over names, staff positions and locations.
    pub fn find(&self, query: &str) -> SearchResults<'_> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return SearchResults::default();
        }
        SearchResults {
            students: self
                .students()
                .filter(|s| {
                    contains_ignore_case(&s.name, &query) || contains_ignore_case(s.location(), &query)
                })
                .collect(),
            staff: self
                .staff()
                .filter(|s| {
                    contains_ignore_case(&s.name, &query)
                        || contains_ignore_case(&s.position, &query)
                        || contains_ignore_case(s.location(), &query)
                })
                .collect(),
        }
    }

    fn student_id(&self, name: &str) -> Result<StudentId, RegistryError> {
        self.students
            .position(name)
            .map(StudentId)
            .ok_or_else(|| RegistryError::StudentNotFound(name.to_string()))
    }

    fn staff_id(&self, name: &str) -> Result<StaffId, RegistryError> {
        self.staff
            .position(name)
            .map(StaffId)
            .ok_or_else(|| RegistryError::StaffNotFound(name.to_string()))
    }

    fn room_position(&self, name: &str) -> Result<usize, RegistryError> {
        self.rooms
            .position(name)
            .ok_or_else(|| RegistryError::RoomNotFound(name.to_string()))
    }

    // =========================================================================
    // Attendance and clocking
    // =========================================================================

    pub fn mark_present(&mut self, name: &str) -> Result<(), RegistryError> {
        let id = self.student_id(name)?;
        self.students.items[id.0].mark_present()?;
        info!(student = %self.students.items[id.0].name, "Marked present");
        Ok(())
    }

    /// Mark a student absent, removing them from whatever room they are in.
    /// Returns that room's name.
    pub fn mark_absent(&mut self, name: &str) -> Result<Option<String>, RegistryError> {
        let id = self.student_id(name)?;
        self.students.items[id.0].mark_absent()?;
        let evicted_from = self.evict_student(id);
        info!(student = %self.students.items[id.0].name, ?evicted_from, "Marked absent");
        Ok(evicted_from)
    }

    pub fn clock_in(&mut self, name: &str) -> Result<(), RegistryError> {
        let id = self.staff_id(name)?;
        self.staff.items[id.0].clock_in()?;
        info!(staff = %self.staff.items[id.0].name, "Clocked in");
        Ok(())
    }

    /// Clock a staff member out, removing them from their room.
    /// Returns that room's name.
    pub fn clock_out(&mut self, name: &str) -> Result<Option<String>, RegistryError> {
        let id = self.staff_id(name)?;
        self.staff.items[id.0].clock_out()?;
        let evicted_from = self.evict_staff(id);
        info!(staff = %self.staff.items[id.0].name, ?evicted_from, "Clocked out");
        Ok(evicted_from)
    }

    // =========================================================================
    // Room assignment
    // =========================================================================

    /// Remove a student from the room that holds them. A student is in at
    /// most one room, so the scan stops at the first match.
    fn evict_student(&mut self, id: StudentId) -> Option<String> {
        let student = &mut self.students.items[id.0];
        let room = self
            .rooms
            .items
            .iter_mut()
            .find(|room| room.contains_student(id))?;
        room.remove_student(id, student);
        debug!(student = %student.name, room = %room.name, "Removed student from room");
        Some(room.name.clone())
    }

    fn evict_staff(&mut self, id: StaffId) -> Option<String> {
        let staff = &mut self.staff.items[id.0];
        let room = self
            .rooms
            .items
            .iter_mut()
            .find(|room| room.contains_staff(id))?;
        room.remove_staff(id, staff);
        debug!(staff = %staff.name, room = %room.name, "Removed staff from room");
        Some(room.name.clone())
    }

    /// Move a student into `room`.
    ///
    /// The student leaves their current room before the target room checks
    /// presence and capacity. If the target then rejects them, they stay
    /// unassigned; the error's `evicted_from` says where they came from.
    pub fn assign_student(&mut self, student: &str, room: &str) -> Result<Placement, AssignError> {
        let id = self.student_id(student)?;
        let room_pos = self.room_position(room)?;
        if self.rooms.items[room_pos].is_closed {
            return Err(RegistryError::RoomClosed(self.rooms.items[room_pos].name.clone()).into());
        }

        let evicted_from = self.evict_student(id);

        let target = &mut self.rooms.items[room_pos];
        let seated = &mut self.students.items[id.0];
        match target.add_student(id, seated) {
            Ok(()) => {
                info!(student = %seated.name, room = %target.name, "Student assigned");
                Ok(Placement {
                    person: seated.name.clone(),
                    room: target.name.clone(),
                    evicted_from,
                })
            }
            Err(reason) => {
                debug!(student = %seated.name, room = %target.name, %reason, "Assignment rejected");
                Err(AssignError {
                    reason,
                    evicted_from,
                })
            }
        }
    }

    /// Move a staff member into `room`. Same eviction rule as students;
    /// rooms have no staff limit.
    pub fn assign_staff(&mut self, staff: &str, room: &str) -> Result<Placement, AssignError> {
        let id = self.staff_id(staff)?;
        let room_pos = self.room_position(room)?;
        if self.rooms.items[room_pos].is_closed {
            return Err(RegistryError::RoomClosed(self.rooms.items[room_pos].name.clone()).into());
        }

        let evicted_from = self.evict_staff(id);

        let target = &mut self.rooms.items[room_pos];
        let member = &mut self.staff.items[id.0];
        match target.add_staff(id, member) {
            Ok(()) => {
                info!(staff = %member.name, room = %target.name, "Staff assigned");
                Ok(Placement {
                    person: member.name.clone(),
                    room: target.name.clone(),
                    evicted_from,
                })
            }
            Err(reason) => {
                debug!(staff = %member.name, room = %target.name, %reason, "Assignment rejected");
                Err(AssignError {
                    reason,
                    evicted_from,
                })
            }
        }
    }

    pub fn open_room(&mut self, name: &str) -> Result<(), RegistryError> {
        let pos = self.room_position(name)?;
        let room = &mut self.rooms.items[pos];
        if !room.is_closed {
            return Err(RegistryError::AlreadyOpen(room.name.clone()));
        }
        room.is_closed = false;
        info!(room = %room.name, "Room opened");
        Ok(())
    }

    /// Close a room, sending every occupant back to unassigned.
    pub fn close_room(&mut self, name: &str) -> Result<Closure, RegistryError> {
        let pos = self.room_position(name)?;
        let room = &mut self.rooms.items[pos];
        if room.is_closed {
            return Err(RegistryError::AlreadyClosed(room.name.clone()));
        }

        let students = &mut self.students.items;
        let evicted_students = room
            .students
            .drain(..)
            .map(|id| {
                let student = &mut students[id.0];
                student.location = UNASSIGNED.to_string();
                student.name.clone()
            })
            .collect();

        let staff = &mut self.staff.items;
        let evicted_staff = room
            .staff
            .drain(..)
            .map(|id| {
                let member = &mut staff[id.0];
                member.location = UNASSIGNED.to_string();
                member.name.clone()
            })
            .collect();

        room.is_closed = true;
        let closure = Closure {
            room: room.name.clone(),
            students: evicted_students,
            staff: evicted_staff,
        };
        info!(
            room = %closure.room,
            students = closure.students.len(),
            staff = closure.staff.len(),
            "Room closed"
        );
        Ok(closure)
    }
}

// ============================================================================
// Tests
// ============================================================================
