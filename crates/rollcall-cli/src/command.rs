//! Parsing of operator input into commands.
//!
//! The first token is the command name (any case). People are named by two
//! tokens, first and last. Anything after the fixed arguments is joined
//! back together with single spaces, so room names and file paths may
//! contain spaces.

use rollcall_core::RecordKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Load { kind: RecordKind, path: String },
    Info { name: String },
    AllStudents,
    AllStaff,
    AllRooms,
    RoomInfo { room: String },
    AssignStudent { name: String, room: String },
    AssignStaff { name: String, room: String },
    OpenRoom { room: String },
    CloseRoom { room: String },
    MarkPresent { name: String },
    MarkAbsent { name: String },
    ClockIn { name: String },
    ClockOut { name: String },
    Find { query: String },
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown Command!")]
    Unknown(String),

    #[error("{0}")]
    Usage(&'static str),
}

const NEED_FILE: &str = "Please provide a filename.";
const NEED_NAME: &str = "Please enter first and last name";
const NEED_ROOM: &str = "Please provide a room name.";
const NEED_QUERY: &str = "Please provide text to search for.";
const NEED_STUDENT_AND_ROOM: &str = "Usage: ASSIGN_STUDENT <first> <last> <room>";
const NEED_STAFF_AND_ROOM: &str = "Usage: ASSIGN_STAFF <first> <last> <room>";

/// Every command as (name, argument hint, description), in help order.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("HELP", "", "Prints help message"),
    ("LOAD_STUDENTS", "(filename)", "Loads students from specified file"),
    ("LOAD_STAFF", "(filename)", "Loads staff from specified file"),
    ("LOAD_ROOMS", "(filename)", "Loads rooms from specified file"),
    ("INFO", "(FirstName LastName)", "Returns info for specified person"),
    ("FIND", "(text)", "Searches names, positions and locations"),
    ("ALL_STUDENTS", "", "Lists all students and info"),
    ("ALL_STAFF", "", "Lists all staff and info"),
    ("ALL_ROOMS", "", "Lists all rooms and info"),
    ("ROOM_INFO", "(RoomName)", "Shows a room and who is in it"),
    ("ASSIGN_STUDENT", "(FirstName LastName RoomName)", "Moves a present student into a room"),
    ("ASSIGN_STAFF", "(FirstName LastName RoomName)", "Moves a clocked-in staff member into a room"),
    ("OPEN_ROOM", "(RoomName)", "Opens a closed room"),
    ("CLOSE_ROOM", "(RoomName)", "Closes a room and sends everyone in it out"),
    ("MARK_PRESENT", "(FirstName LastName)", "Marks student present"),
    ("MARK_ABSENT", "(FirstName LastName)", "Marks student absent"),
    ("CLOCK_IN", "(FirstName LastName)", "Clocks staff in"),
    ("CLOCK_OUT", "(FirstName LastName)", "Clocks staff out"),
    ("QUIT", "", "Quits program"),
];

/// Parse one input line. Returns `None` for a blank line.
pub fn parse(line: &str) -> Option<Result<Command, CommandError>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (first, args) = tokens.split_first()?;
    Some(parse_tokens(&first.to_uppercase(), args))
}

fn parse_tokens(command: &str, args: &[&str]) -> Result<Command, CommandError> {
    match command {
        "HELP" => Ok(Command::Help),
        "LOAD_STUDENTS" => load(RecordKind::Student, args),
        "LOAD_STAFF" => load(RecordKind::Staff, args),
        "LOAD_ROOMS" => load(RecordKind::Room, args),
        "INFO" => Ok(Command::Info { name: full_name(args)? }),
        "FIND" => Ok(Command::Find {
            query: rest(args, 0).ok_or(CommandError::Usage(NEED_QUERY))?,
        }),
        "ALL_STUDENTS" => Ok(Command::AllStudents),
        "ALL_STAFF" => Ok(Command::AllStaff),
        "ALL_ROOMS" => Ok(Command::AllRooms),
        "ROOM_INFO" => Ok(Command::RoomInfo { room: room(args)? }),
        "ASSIGN_STUDENT" => {
            let (name, room) = person_and_room(args, NEED_STUDENT_AND_ROOM)?;
            Ok(Command::AssignStudent { name, room })
        }
        "ASSIGN_STAFF" => {
            let (name, room) = person_and_room(args, NEED_STAFF_AND_ROOM)?;
            Ok(Command::AssignStaff { name, room })
        }
        "OPEN_ROOM" => Ok(Command::OpenRoom { room: room(args)? }),
        "CLOSE_ROOM" => Ok(Command::CloseRoom { room: room(args)? }),
        "MARK_PRESENT" => Ok(Command::MarkPresent { name: full_name(args)? }),
        "MARK_ABSENT" => Ok(Command::MarkAbsent { name: full_name(args)? }),
        "CLOCK_IN" => Ok(Command::ClockIn { name: full_name(args)? }),
        "CLOCK_OUT" => Ok(Command::ClockOut { name: full_name(args)? }),
        "QUIT" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Tokens from `start` on, joined by single spaces.
fn rest(args: &[&str], start: usize) -> Option<String> {
    args.get(start..)
        .filter(|tail| !tail.is_empty())
        .map(|tail| tail.join(" "))
}

fn load(kind: RecordKind, args: &[&str]) -> Result<Command, CommandError> {
    let path = rest(args, 0).ok_or(CommandError::Usage(NEED_FILE))?;
    Ok(Command::Load { kind, path })
}

fn full_name(args: &[&str]) -> Result<String, CommandError> {
    match args {
        [first, last, ..] => Ok(format!("{} {}", first, last)),
        _ => Err(CommandError::Usage(NEED_NAME)),
    }
}

fn room(args: &[&str]) -> Result<String, CommandError> {
    rest(args, 0).ok_or(CommandError::Usage(NEED_ROOM))
}

fn person_and_room(args: &[&str], usage: &'static str) -> Result<(String, String), CommandError> {
    let name = full_name(args).map_err(|_| CommandError::Usage(usage))?;
    let room = rest(args, 2).ok_or(CommandError::Usage(usage))?;
    Ok((name, room))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(line: &str) -> Command {
        parse(line).unwrap().unwrap()
    }

    fn err(line: &str) -> CommandError {
        parse(line).unwrap().unwrap_err()
    }

    #[test]
    fn test_blank_line() {
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
    }

    #[test]
    fn test_command_name_case_insensitive() {
        assert_eq!(ok("help"), Command::Help);
        assert_eq!(ok("Quit"), Command::Quit);
        assert_eq!(ok("all_rooms"), Command::AllRooms);
    }

    #[test]
    fn test_name_arguments() {
        assert_eq!(
            ok("MARK_PRESENT ann lee"),
            Command::MarkPresent { name: "ann lee".into() }
        );
        assert_eq!(ok("info Ann  Lee"), Command::Info { name: "Ann Lee".into() });
        assert_eq!(err("CLOCK_IN Ed"), CommandError::Usage(NEED_NAME));
    }

    #[test]
    fn test_room_names_may_contain_spaces() {
        assert_eq!(
            ok("ASSIGN_STUDENT Ann Lee Room 101"),
            Command::AssignStudent {
                name: "Ann Lee".into(),
                room: "Room 101".into()
            }
        );
        assert_eq!(ok("close_room Art Studio"), Command::CloseRoom { room: "Art Studio".into() });
        assert_eq!(err("ASSIGN_STAFF Ed Fox"), CommandError::Usage(NEED_STAFF_AND_ROOM));
        assert_eq!(err("ROOM_INFO"), CommandError::Usage(NEED_ROOM));
    }

    #[test]
    fn test_load_commands() {
        assert_eq!(
            ok("LOAD_ROOMS data/rooms.csv"),
            Command::Load {
                kind: RecordKind::Room,
                path: "data/rooms.csv".into()
            }
        );
        assert_eq!(err("load_students"), CommandError::Usage(NEED_FILE));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(err("DANCE now"), CommandError::Unknown("DANCE".into()));
        assert_eq!(err("DANCE").to_string(), "Unknown Command!");
    }

    #[test]
    fn test_every_listed_command_parses() {
        for (name, _, _) in COMMANDS {
            let line = format!("{} a b c", name);
            assert!(parse(&line).unwrap().is_ok(), "{} should parse", name);
        }
    }
}
