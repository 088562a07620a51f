//! Text rendering of registry state and command outcomes.

use chrono::{DateTime, Local, Utc};
use rollcall_core::{
    Closure, GuardianWarning, LineOutcome, LoadReport, Placement, Registry, Room, Staff, Student,
};

use crate::command::COMMANDS;

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn clock_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-I:%M %p").to_string()
}

pub fn help() -> Vec<String> {
    let mut lines = vec![String::new(), "List of commands:".to_string()];
    for (name, args, description) in COMMANDS {
        if args.is_empty() {
            lines.push(format!("{} - {}", name, description));
        } else {
            lines.push(format!("{} {} - {}", name, args, description));
        }
    }
    lines.push(String::new());
    lines
}

pub fn student(s: &Student) -> String {
    let mut out = String::new();
    out.push_str(&format!("Name: {}\n", s.name));
    out.push_str(&format!("Grade: {}\n", s.grade));
    out.push_str(&format!("Gender: {}\n", or_dash(&s.gender)));
    out.push_str(&format!("Allergies: {}\n", or_dash(&s.allergies)));
    out.push_str(&format!("Medications: {}\n", or_dash(&s.meds)));
    out.push_str(&format!("Needs Para: {}\n", yes_no(s.needs_para)));
    out.push_str(&format!("Is Present: {}\n", yes_no(s.is_present())));
    if let Some(since) = s.present_since() {
        out.push_str(&format!("Present Since: {}\n", clock_time(since)));
    }
    out.push_str(&format!("Location: {}\n", s.location()));
    out.push_str("Authorized Pickups:\n");

    if s.guardians.is_empty() {
        out.push_str("  None\n");
    } else {
        for g in &s.guardians {
            out.push_str(&format!("  {}\n", g));
        }
    }
    out
}

pub fn staff(s: &Staff) -> String {
    let mut out = format!(
        "Staff Member: {}\nPosition: {}\nShift: {}\nLocation: {}\nEmail: {}\nClocked In: {}\n",
        s.name,
        or_dash(&s.position),
        or_dash(&s.shift),
        s.location(),
        or_dash(&s.email),
        yes_no(s.is_clocked_in()),
    );
    if let Some(since) = s.clocked_in_since() {
        out.push_str(&format!("Clocked In Since: {}\n", clock_time(since)));
    }
    out
}

/// Room summary followed by the ratio and everyone currently inside.
pub fn room(registry: &Registry, room: &Room) -> String {
    let mut out = format!("{}\nRatio: {}\n", room, room.ratio());

    let students: Vec<&str> = registry.room_students(room).map(|s| s.name.as_str()).collect();
    let staff: Vec<&str> = registry.room_staff(room).map(|s| s.name.as_str()).collect();
    if !staff.is_empty() {
        out.push_str(&format!("Staff: {}\n", staff.join(", ")));
    }
    if !students.is_empty() {
        out.push_str(&format!("Students: {}\n", students.join(", ")));
    }
    out
}

/// Numbered blocks for `ALL_*` listings, or `empty` when there are none.
pub fn listing<'a, T: 'a>(
    label: &str,
    empty: &str,
    items: impl Iterator<Item = &'a T>,
    render: impl Fn(&T) -> String,
) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, item) in items.enumerate() {
        lines.push(format!("----- {} {} -----", label, i + 1));
        lines.push(render(item));
    }
    if lines.is_empty() {
        lines.push(empty.to_string());
    }
    lines
}

pub fn load_report(report: &LoadReport) -> Vec<String> {
    let mut lines = Vec::new();
    for outcome in &report.lines {
        match outcome {
            LineOutcome::Loaded { name, warnings, .. } => {
                lines.extend(warnings.iter().map(guardian_warning));
                lines.push(format!("Loaded {}: {}", report.kind, name));
            }
            LineOutcome::Skipped {
                line_number,
                line,
                error,
            } => {
                lines.push(format!("Line {}: {}", line_number, error));
                lines.push(format!("  {}", line));
            }
        }
    }
    lines.push(format!(
        "Finished loading {} {}.",
        report.loaded_count(),
        report.kind.plural()
    ));
    lines
}

fn guardian_warning(warning: &GuardianWarning) -> String {
    format!("Warning: {}", warning)
}

pub fn eviction(person: &str, room: &str) -> String {
    format!("{} removed from {}", person, room)
}

pub fn student_placement(p: &Placement) -> Vec<String> {
    let mut lines: Vec<String> = p.evicted_from.iter().map(|r| eviction(&p.person, r)).collect();
    lines.push(format!("Student {} added to {}", p.person, p.room));
    lines
}

pub fn staff_placement(p: &Placement) -> Vec<String> {
    let mut lines: Vec<String> = p.evicted_from.iter().map(|r| eviction(&p.person, r)).collect();
    lines.push(format!("Staff {} assigned to {}", p.person, p.room));
    lines
}

pub fn closure(c: &Closure) -> Vec<String> {
    let mut lines: Vec<String> = c
        .students
        .iter()
        .chain(&c.staff)
        .map(|name| eviction(name, &c.room))
        .collect();
    lines.push(format!(
        "Room {} closed ({} students and {} staff removed)",
        c.room,
        c.students.len(),
        c.staff.len()
    ));
    lines
}
