use chrono::{DateTime, Utc};

use crate::error::RegistryError;
use crate::models::Guardian;

/// Location shown for a person who is not in any room.
pub const UNASSIGNED: &str = "N/A";

/// Location shown for a staff member who is off the clock.
pub const NOT_CLOCKED_IN: &str = "Not clocked in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub grade: i32,
    pub gender: String,
    pub guardians: Vec<Guardian>,
    pub allergies: String,
    pub needs_para: bool,
    pub meds: String,
    pub(crate) location: String,
    pub(crate) is_present: bool,
    pub(crate) present_since: Option<DateTime<Utc>>,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        grade: i32,
        gender: impl Into<String>,
        guardians: Vec<Guardian>,
        allergies: impl Into<String>,
        needs_para: bool,
        meds: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            grade,
            gender: gender.into(),
            guardians,
            allergies: allergies.into(),
            needs_para,
            meds: meds.into(),
            location: UNASSIGNED.to_string(),
            is_present: false,
            present_since: None,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_present(&self) -> bool {
        self.is_present
    }

    pub fn present_since(&self) -> Option<DateTime<Utc>> {
        self.present_since
    }

    /// Absent -> Present.
    pub(crate) fn mark_present(&mut self) -> Result<(), RegistryError> {
        if self.is_present {
            return Err(RegistryError::AlreadyPresent(self.name.clone()));
        }
        self.is_present = true;
        self.present_since = Some(Utc::now());
        Ok(())
    }

    /// Present -> Absent. Room membership is the registry's job; this only
    /// flips the flag and clears the location.
    pub(crate) fn mark_absent(&mut self) -> Result<(), RegistryError> {
        if !self.is_present {
            return Err(RegistryError::AlreadyAbsent(self.name.clone()));
        }
        self.is_present = false;
        self.present_since = None;
        self.location = UNASSIGNED.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staff {
    pub name: String,
    pub position: String,
    pub shift: String,
    pub email: String,
    pub(crate) location: String,
    pub(crate) is_clocked_in: bool,
    pub(crate) clocked_in_since: Option<DateTime<Utc>>,
}

impl Staff {
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        shift: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            shift: shift.into(),
            email: email.into(),
            location: NOT_CLOCKED_IN.to_string(),
            is_clocked_in: false,
            clocked_in_since: None,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_clocked_in(&self) -> bool {
        self.is_clocked_in
    }

    pub fn clocked_in_since(&self) -> Option<DateTime<Utc>> {
        self.clocked_in_since
    }

    /// ClockedOut -> ClockedIn. Location is untouched until a room is assigned.
    pub(crate) fn clock_in(&mut self) -> Result<(), RegistryError> {
        if self.is_clocked_in {
            return Err(RegistryError::AlreadyClockedIn(self.name.clone()));
        }
        self.is_clocked_in = true;
        self.clocked_in_since = Some(Utc::now());
        Ok(())
    }

    /// ClockedIn -> ClockedOut.
    pub(crate) fn clock_out(&mut self) -> Result<(), RegistryError> {
        if !self.is_clocked_in {
            return Err(RegistryError::AlreadyClockedOut(self.name.clone()));
        }
        self.is_clocked_in = false;
        self.clocked_in_since = None;
        self.location = NOT_CLOCKED_IN.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student::new("Ann Lee", 3, "F", Vec::new(), "None", false, "None")
    }

    #[test]
    fn test_student_defaults() {
        let s = student();
        assert!(!s.is_present());
        assert_eq!(s.location(), UNASSIGNED);
        assert!(s.present_since().is_none());
    }

    #[test]
    fn test_student_attendance_transitions() {
        let mut s = student();
        assert_eq!(s.mark_absent(), Err(RegistryError::AlreadyAbsent("Ann Lee".into())));

        s.mark_present().unwrap();
        assert!(s.is_present());
        assert!(s.present_since().is_some());
        assert_eq!(s.mark_present(), Err(RegistryError::AlreadyPresent("Ann Lee".into())));

        s.location = "Gym".to_string();
        s.mark_absent().unwrap();
        assert!(!s.is_present());
        assert_eq!(s.location(), UNASSIGNED);
    }

    #[test]
    fn test_staff_clock_transitions() {
        let mut t = Staff::new("Bo Park", "Teacher", "AM", "bo@school.org");
        assert_eq!(t.location(), NOT_CLOCKED_IN);
        assert_eq!(t.clock_out(), Err(RegistryError::AlreadyClockedOut("Bo Park".into())));

        t.clock_in().unwrap();
        assert!(t.is_clocked_in());
        assert_eq!(t.location(), NOT_CLOCKED_IN);
        assert_eq!(t.clock_in(), Err(RegistryError::AlreadyClockedIn("Bo Park".into())));

        t.clock_out().unwrap();
        assert!(!t.is_clocked_in());
        assert!(t.clocked_in_since().is_none());
        assert_eq!(t.location(), NOT_CLOCKED_IN);
    }
}
