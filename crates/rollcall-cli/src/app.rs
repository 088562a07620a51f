//! Command dispatch for rollcall.
//!
//! `App` owns the registry and turns each input line into the lines of text
//! to show the operator.

use std::path::Path;

use rollcall_core::{AssignError, RecordKind, Registry};
use tracing::{debug, warn};

use crate::command::{self, Command};
use crate::config::Config;
use crate::render;

/// Output of one command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Response {
    fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            quit: false,
        }
    }

    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }
}

#[derive(Debug, Default)]
pub struct App {
    pub registry: Registry,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the data files named in `config`, rooms first so that later
    /// files can be checked against them.
    pub fn preload(&mut self, config: &Config) -> Vec<String> {
        let files = [
            (RecordKind::Room, &config.rooms_file),
            (RecordKind::Staff, &config.staff_file),
            (RecordKind::Student, &config.students_file),
        ];

        let mut lines = Vec::new();
        for (kind, path) in files {
            if let Some(path) = path {
                debug!(%kind, path = %path.display(), "Preloading");
                lines.extend(self.load(kind, path));
            }
        }
        lines
    }

    /// Execute one line of operator input.
    pub fn execute(&mut self, line: &str) -> Response {
        match command::parse(line) {
            None => Response::default(),
            Some(Err(e)) => {
                debug!(input = line, error = %e, "Rejected command");
                Response::line(e.to_string())
            }
            Some(Ok(cmd)) => {
                debug!(?cmd, "Executing command");
                self.dispatch(cmd)
            }
        }
    }

    fn dispatch(&mut self, cmd: Command) -> Response {
        match cmd {
            Command::Help => Response::lines(render::help()),
            Command::Load { kind, path } => Response::lines(self.load(kind, Path::new(&path))),
            Command::Info { name } => self.info(&name),
            Command::Find { query } => self.find(&query),
            Command::AllStudents => Response::lines(render::listing(
                "Student",
                "No Students!",
                self.registry.students(),
                render::student,
            )),
            Command::AllStaff => Response::lines(render::listing(
                "Staff",
                "No Staff!",
                self.registry.staff(),
                render::staff,
            )),
            Command::AllRooms => Response::lines(render::listing(
                "Room",
                "No Rooms!",
                self.registry.rooms(),
                |room| render::room(&self.registry, room),
            )),
            Command::RoomInfo { room } => match self.registry.room(&room) {
                Some(r) => Response::line(render::room(&self.registry, r)),
                None => Response::line(format!("Room {} not found", room)),
            },
            Command::AssignStudent { name, room } => {
                match self.registry.assign_student(&name, &room) {
                    Ok(placement) => Response::lines(render::student_placement(&placement)),
                    Err(e) => Response::lines(assign_failure(&self.student_name(&name), e)),
                }
            }
            Command::AssignStaff { name, room } => match self.registry.assign_staff(&name, &room) {
                Ok(placement) => Response::lines(render::staff_placement(&placement)),
                Err(e) => Response::lines(assign_failure(&self.staff_name(&name), e)),
            },
            Command::OpenRoom { room } => match self.registry.open_room(&room) {
                Ok(()) => Response::line(format!("Room {} opened", self.room_name(&room))),
                Err(e) => Response::line(e.to_string()),
            },
            Command::CloseRoom { room } => match self.registry.close_room(&room) {
                Ok(closure) => Response::lines(render::closure(&closure)),
                Err(e) => Response::line(e.to_string()),
            },
            Command::MarkPresent { name } => match self.registry.mark_present(&name) {
                Ok(()) => Response::line(format!("{} marked present", self.student_name(&name))),
                Err(e) => Response::line(e.to_string()),
            },
            Command::MarkAbsent { name } => match self.registry.mark_absent(&name) {
                Ok(evicted) => {
                    let person = self.student_name(&name);
                    let mut lines: Vec<String> =
                        evicted.iter().map(|r| render::eviction(&person, r)).collect();
                    lines.push(format!("{} marked absent", person));
                    Response::lines(lines)
                }
                Err(e) => Response::line(e.to_string()),
            },
            Command::ClockIn { name } => match self.registry.clock_in(&name) {
                Ok(()) => Response::line(format!("{} clocked in", self.staff_name(&name))),
                Err(e) => Response::line(e.to_string()),
            },
            Command::ClockOut { name } => match self.registry.clock_out(&name) {
                Ok(evicted) => {
                    let person = self.staff_name(&name);
                    let mut lines: Vec<String> =
                        evicted.iter().map(|r| render::eviction(&person, r)).collect();
                    lines.push(format!("{} clocked out", person));
                    Response::lines(lines)
                }
                Err(e) => Response::line(e.to_string()),
            },
            Command::Quit => Response {
                lines: vec!["Thank You!".to_string()],
                quit: true,
            },
        }
    }

    fn load(&mut self, kind: RecordKind, path: &Path) -> Vec<String> {
        match self.registry.load_file(kind, path) {
            Ok(report) => render::load_report(&report),
            Err(e) => {
                warn!(error = %e, "Failed to load data file");
                vec![e.to_string()]
            }
        }
    }

    fn info(&self, name: &str) -> Response {
        let mut lines = Vec::new();
        if let Some(student) = self.registry.student(name) {
            lines.push(render::student(student));
        }
        if let Some(staff) = self.registry.staff_member(name) {
            lines.push(render::staff(staff));
        }
        if lines.is_empty() {
            lines.push(format!("{} not found!", name));
        }
        Response::lines(lines)
    }

    fn find(&self, query: &str) -> Response {
        let results = self.registry.find(query);
        if results.is_empty() {
            return Response::line(format!("No matches for \"{}\"", query));
        }

        let mut lines = Vec::new();
        for student in &results.students {
            lines.push(format!("Student: {} ({})", student.name, student.location()));
        }
        for staff in &results.staff {
            lines.push(format!(
                "Staff: {} - {} ({})",
                staff.name,
                staff.position,
                staff.location()
            ));
        }
        Response::lines(lines)
    }

    // Canonical spellings for messages, falling back to what was typed.

    fn student_name(&self, name: &str) -> String {
        self.registry
            .student(name)
            .map_or_else(|| name.to_string(), |s| s.name.clone())
    }

    fn staff_name(&self, name: &str) -> String {
        self.registry
            .staff_member(name)
            .map_or_else(|| name.to_string(), |s| s.name.clone())
    }

    fn room_name(&self, name: &str) -> String {
        self.registry
            .room(name)
            .map_or_else(|| name.to_string(), |r| r.name.clone())
    }
}

fn assign_failure(name: &str, e: AssignError) -> Vec<String> {
    debug!(person = name, error = %e.reason, evicted = ?e.evicted_from, "Assignment failed");
    let mut lines = Vec::new();
    if let Some(room) = &e.evicted_from {
        lines.push(render::eviction(name, room));
    }
    lines.push(e.to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOMS: &str = "Gym,2\nArt Studio,1\n";
    const STAFF: &str = "Ed Fox,Teacher,AM,ed@school.org\nKim Roe,Aide,PM\n";
    const STUDENTS: &str = "Ann Lee,3,F,((Jane Lee;Mother;5551234567)),Peanuts,yes,None\n\
                            Bo Park,2,M,None,None,no,None\n\
                            Cy Dunn,4,M,None,None,no,Inhaler\n";

    fn app() -> App {
        let mut app = App::new();
        app.registry.load_str(RecordKind::Room, ROOMS);
        app.registry.load_str(RecordKind::Staff, STAFF);
        app.registry.load_str(RecordKind::Student, STUDENTS);
        app
    }

    fn run(app: &mut App, line: &str) -> Vec<String> {
        app.execute(line).lines
    }

    // ------------------------------------------------------------------------
    // Dispatch basics
    // ------------------------------------------------------------------------

    #[test]
    fn test_blank_and_unknown() {
        let mut app = app();
        assert_eq!(app.execute("   "), Response::default());
        assert_eq!(run(&mut app, "DANCE"), vec!["Unknown Command!"]);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        let response = app.execute("quit");
        assert!(response.quit);
        assert_eq!(response.lines, vec!["Thank You!"]);
    }

    #[test]
    fn test_help_lists_every_command() {
        let mut app = App::new();
        let lines = run(&mut app, "HELP");
        for (name, _, _) in command::COMMANDS {
            assert!(lines.iter().any(|l| l.starts_with(name)), "{} missing", name);
        }
    }

    #[test]
    fn test_empty_listings() {
        let mut app = App::new();
        assert_eq!(run(&mut app, "ALL_STUDENTS"), vec!["No Students!"]);
        assert_eq!(run(&mut app, "ALL_STAFF"), vec!["No Staff!"]);
        assert_eq!(run(&mut app, "ALL_ROOMS"), vec!["No Rooms!"]);
    }

    #[test]
    fn test_listing_is_numbered_in_load_order() {
        let mut app = app();
        let lines = run(&mut app, "ALL_STUDENTS");
        assert_eq!(lines[0], "----- Student 1 -----");
        assert!(lines[1].starts_with("Name: Ann Lee\n"));
        assert_eq!(lines[4], "----- Student 3 -----");
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    #[test]
    fn test_info_is_case_insensitive() {
        let mut app = app();
        let lines = run(&mut app, "INFO ann LEE");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Phone: (555) 123-4567"));

        assert_eq!(run(&mut app, "INFO No Body"), vec!["No Body not found!"]);
    }

    #[test]
    fn test_find() {
        let mut app = app();
        assert_eq!(run(&mut app, "FIND aide"), vec!["Staff: Kim Roe - Aide (Not clocked in)"]);
        assert_eq!(run(&mut app, "FIND zzz"), vec!["No matches for \"zzz\""]);
    }

    // ------------------------------------------------------------------------
    // Assignment scenarios
    // ------------------------------------------------------------------------

    #[test]
    fn test_assign_requires_presence() {
        let mut app = app();
        assert_eq!(
            run(&mut app, "ASSIGN_STUDENT Ann Lee Gym"),
            vec!["Cannot add student Ann Lee - student is not present"]
        );
        assert_eq!(run(&mut app, "MARK_PRESENT ann lee"), vec!["Ann Lee marked present"]);
        assert_eq!(run(&mut app, "ASSIGN_STUDENT Ann Lee gym"), vec!["Student Ann Lee added to Gym"]);
        assert_eq!(app.registry.student("Ann Lee").unwrap().location(), "Gym");
    }

    #[test]
    fn test_move_reports_eviction() {
        let mut app = app();
        run(&mut app, "MARK_PRESENT Ann Lee");
        run(&mut app, "ASSIGN_STUDENT Ann Lee Gym");
        assert_eq!(
            run(&mut app, "ASSIGN_STUDENT Ann Lee Art Studio"),
            vec!["Ann Lee removed from Gym", "Student Ann Lee added to Art Studio"]
        );
    }

    #[test]
    fn test_full_room_keeps_eviction() {
        let mut app = app();
        run(&mut app, "MARK_PRESENT Ann Lee");
        run(&mut app, "MARK_PRESENT Bo Park");
        run(&mut app, "ASSIGN_STUDENT Ann Lee Art Studio");
        run(&mut app, "ASSIGN_STUDENT Bo Park Gym");

        let lines = run(&mut app, "ASSIGN_STUDENT Bo Park Art Studio");
        assert_eq!(lines[0], "Bo Park removed from Gym");
        assert!(lines[1].contains("at capacity"));
        assert_eq!(app.registry.student("Bo Park").unwrap().location(), "N/A");
    }

    #[test]
    fn test_failed_move_names_person_canonically() {
        let mut app = app();
        run(&mut app, "MARK_PRESENT Ann Lee");
        run(&mut app, "MARK_PRESENT Bo Park");
        run(&mut app, "ASSIGN_STUDENT Ann Lee Art Studio");
        run(&mut app, "ASSIGN_STUDENT Bo Park Gym");

        let lines = run(&mut app, "ASSIGN_STUDENT bo park Art Studio");
        assert_eq!(lines[0], "Bo Park removed from Gym");
        assert!(lines[1].contains("at capacity"));
    }

    #[test]
    fn test_staff_clock_cycle() {
        let mut app = app();
        assert_eq!(
            run(&mut app, "ASSIGN_STAFF Ed Fox Gym"),
            vec!["Cannot add staff Ed Fox - staff is not clocked in"]
        );
        assert_eq!(run(&mut app, "CLOCK_IN ed fox"), vec!["Ed Fox clocked in"]);
        assert_eq!(run(&mut app, "ASSIGN_STAFF Ed Fox Gym"), vec!["Staff Ed Fox assigned to Gym"]);
        assert_eq!(
            run(&mut app, "CLOCK_OUT Ed Fox"),
            vec!["Ed Fox removed from Gym", "Ed Fox clocked out"]
        );
        assert_eq!(run(&mut app, "CLOCK_OUT Ed Fox"), vec!["Ed Fox is already clocked out"]);
    }

    #[test]
    fn test_close_and_open_room() {
        let mut app = app();
        run(&mut app, "MARK_PRESENT Cy Dunn");
        run(&mut app, "ASSIGN_STUDENT Cy Dunn Gym");

        assert_eq!(
            run(&mut app, "CLOSE_ROOM gym"),
            vec!["Cy Dunn removed from Gym", "Room Gym closed (1 students and 0 staff removed)"]
        );
        assert_eq!(run(&mut app, "CLOSE_ROOM Gym"), vec!["Room Gym is already closed"]);
        assert_eq!(run(&mut app, "ASSIGN_STUDENT Cy Dunn Gym"), vec!["Room Gym is closed"]);
        assert_eq!(run(&mut app, "OPEN_ROOM gym"), vec!["Room Gym opened"]);
    }

    #[test]
    fn test_mark_absent_evicts() {
        let mut app = app();
        run(&mut app, "MARK_PRESENT Bo Park");
        run(&mut app, "ASSIGN_STUDENT Bo Park Gym");
        assert_eq!(
            run(&mut app, "MARK_ABSENT Bo Park"),
            vec!["Bo Park removed from Gym", "Bo Park marked absent"]
        );
        let room = run(&mut app, "ROOM_INFO Gym");
        assert!(room[0].contains("Ratio: 0 staff : 0 students"));
    }

    #[test]
    fn test_unknown_room() {
        let mut app = app();
        assert_eq!(run(&mut app, "ROOM_INFO Attic"), vec!["Room Attic not found"]);
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    #[test]
    fn test_load_missing_file() {
        let mut app = App::new();
        let lines = run(&mut app, "LOAD_ROOMS /definitely/not/here.csv");
        assert_eq!(lines, vec!["File not found: /definitely/not/here.csv"]);
    }

    #[test]
    fn test_preload_order() {
        let dir = tempfile::tempdir().unwrap();
        let rooms = dir.path().join("rooms.csv");
        let staff = dir.path().join("staff.csv");
        std::fs::write(&rooms, ROOMS).unwrap();
        std::fs::write(&staff, STAFF).unwrap();

        let config = Config {
            rooms_file: Some(rooms),
            staff_file: Some(staff),
            ..Default::default()
        };
        let mut app = App::new();
        let lines = app.preload(&config);

        assert_eq!(lines.first().unwrap(), "Loaded room: Gym");
        assert_eq!(lines.last().unwrap(), "Finished loading 2 staff.");
        assert_eq!(app.registry.rooms().count(), 2);
    }
}
