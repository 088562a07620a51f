use crate::error::RegistryError;
use crate::models::{Staff, Student, UNASSIGNED};

/// Position of a student in the registry's student list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(pub(crate) usize);

/// Position of a staff member in the registry's staff list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaffId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub student_capacity: u32,
    pub(crate) students: Vec<StudentId>,
    pub(crate) staff: Vec<StaffId>,
    pub(crate) is_closed: bool,
}

impl Room {
    pub fn new(name: impl Into<String>, student_capacity: u32) -> Self {
        Self {
            name: name.into(),
            student_capacity,
            students: Vec::new(),
            staff: Vec::new(),
            is_closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn staff_count(&self) -> usize {
        self.staff.len()
    }

    pub fn ratio(&self) -> String {
        format!("{} staff : {} students", self.staff.len(), self.students.len())
    }

    pub fn is_full(&self) -> bool {
        self.students.len() >= self.student_capacity as usize
    }

    pub(crate) fn contains_student(&self, id: StudentId) -> bool {
        self.students.contains(&id)
    }

    pub(crate) fn contains_staff(&self, id: StaffId) -> bool {
        self.staff.contains(&id)
    }

    /// Authoritative checks for seating a student: present, not already
    /// here, and room below capacity. Checked in that order.
    pub(crate) fn add_student(
        &mut self,
        id: StudentId,
        student: &mut Student,
    ) -> Result<(), RegistryError> {
        if !student.is_present {
            return Err(RegistryError::NotPresent(student.name.clone()));
        }
        if self.contains_student(id) {
            return Err(RegistryError::AlreadyAssigned {
                person: student.name.clone(),
                room: self.name.clone(),
            });
        }
        if self.is_full() {
            return Err(RegistryError::AtCapacity {
                student: student.name.clone(),
                room: self.name.clone(),
                capacity: self.student_capacity,
            });
        }
        self.students.push(id);
        student.location = self.name.clone();
        Ok(())
    }

    /// Staff have no capacity limit, only the clock-in requirement.
    pub(crate) fn add_staff(&mut self, id: StaffId, staff: &mut Staff) -> Result<(), RegistryError> {
        if !staff.is_clocked_in {
            return Err(RegistryError::NotClockedIn(staff.name.clone()));
        }
        if self.contains_staff(id) {
            return Err(RegistryError::AlreadyAssigned {
                person: staff.name.clone(),
                room: self.name.clone(),
            });
        }
        self.staff.push(id);
        staff.location = self.name.clone();
        Ok(())
    }

    pub(crate) fn remove_student(&mut self, id: StudentId, student: &mut Student) -> bool {
        let before = self.students.len();
        self.students.retain(|s| *s != id);
        let removed = self.students.len() != before;
        if removed && student.location == self.name {
            student.location = UNASSIGNED.to_string();
        }
        removed
    }

    pub(crate) fn remove_staff(&mut self, id: StaffId, staff: &mut Staff) -> bool {
        let before = self.staff.len();
        self.staff.retain(|s| *s != id);
        let removed = self.staff.len() != before;
        if removed && staff.location == self.name {
            staff.location = UNASSIGNED.to_string();
        }
        removed
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Room Name: {}", self.name)?;
        writeln!(f, "Student Capacity: {}", self.student_capacity)?;
        writeln!(f, "Current Students: {}", self.students.len())?;
        writeln!(f, "Current Staff: {}", self.staff.len())?;
        write!(f, "Is Closed: {}", if self.is_closed { "Yes" } else { "No" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present_student(name: &str) -> Student {
        let mut s = Student::new(name, 2, "M", Vec::new(), "None", false, "None");
        s.mark_present().unwrap();
        s
    }

    #[test]
    fn test_add_student_checks_in_order() {
        let mut room = Room::new("Gym", 0);
        let mut absent = Student::new("Ann Lee", 2, "F", Vec::new(), "None", false, "None");
        // Not-present is reported before capacity
        assert_eq!(
            room.add_student(StudentId(0), &mut absent),
            Err(RegistryError::NotPresent("Ann Lee".into()))
        );

        let mut s = present_student("Bo Park");
        assert!(matches!(
            room.add_student(StudentId(1), &mut s),
            Err(RegistryError::AtCapacity { capacity: 0, .. })
        ));
        assert_eq!(s.location(), UNASSIGNED);
    }

    #[test]
    fn test_add_student_sets_location_and_rejects_duplicate() {
        let mut room = Room::new("Library", 5);
        let mut s = present_student("Ann Lee");
        room.add_student(StudentId(0), &mut s).unwrap();
        assert_eq!(s.location(), "Library");
        assert_eq!(
            room.add_student(StudentId(0), &mut s),
            Err(RegistryError::AlreadyAssigned {
                person: "Ann Lee".into(),
                room: "Library".into()
            })
        );
        assert_eq!(room.student_count(), 1);
    }

    #[test]
    fn test_add_staff_requires_clock_in() {
        let mut room = Room::new("Gym", 0);
        let mut t = Staff::new("Cy Moss", "Aide", "PM", "");
        assert_eq!(
            room.add_staff(StaffId(0), &mut t),
            Err(RegistryError::NotClockedIn("Cy Moss".into()))
        );
        t.clock_in().unwrap();
        room.add_staff(StaffId(0), &mut t).unwrap();
        assert_eq!(t.location(), "Gym");
        assert_eq!(room.ratio(), "1 staff : 0 students");
    }

    #[test]
    fn test_remove_student_resets_location() {
        let mut room = Room::new("Gym", 2);
        let mut s = present_student("Ann Lee");
        room.add_student(StudentId(0), &mut s).unwrap();
        assert!(room.remove_student(StudentId(0), &mut s));
        assert_eq!(s.location(), UNASSIGNED);
        assert!(!room.remove_student(StudentId(0), &mut s));
    }

    #[test]
    fn test_room_display() {
        let room = Room::new("Gym", 2);
        let text = room.to_string();
        assert!(text.contains("Room Name: Gym"));
        assert!(text.contains("Student Capacity: 2"));
        assert!(text.contains("Is Closed: No"));
    }
}
