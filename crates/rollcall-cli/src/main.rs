//! rollcall - an in-memory school registry driven from the command line.
//!
//! Loads student, staff and room files, then reads commands that track
//! attendance, clock-ins and who is in which room.

mod app;
mod command;
mod config;
mod editor;
mod render;
mod repl;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use config::Config;
use editor::RustylineEditor;

// ============================================================================
// Constants
// ============================================================================

const LOG_FILE: &str = "rollcall.log";

const WELCOME: &str = "Welcome to rollcall! Please enter a command to continue!";

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    students: Option<PathBuf>,
    staff: Option<PathBuf>,
    rooms: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| -> Result<PathBuf> {
            iter.next()
                .map(PathBuf::from)
                .with_context(|| format!("{} requires a file", flag))
        };
        match arg.as_str() {
            "-h" | "--help" => cli.show_help = true,
            "-V" | "--version" => cli.show_version = true,
            "--students" => cli.students = Some(value("--students")?),
            "--staff" => cli.staff = Some(value("--staff")?),
            "--rooms" => cli.rooms = Some(value("--rooms")?),
            other => bail!("unknown argument: {}", other),
        }
    }

    Ok(cli)
}

fn print_usage() {
    println!(
        "rollcall - in-memory school registry

USAGE:
    rollcall [OPTIONS]

OPTIONS:
    --students FILE    Load students before the first prompt
    --staff FILE       Load staff before the first prompt
    --rooms FILE       Load rooms before the first prompt
    -h, --help         Print help information
    -V, --version      Print version information

ENVIRONMENT:
    ROLLCALL_STUDENTS, ROLLCALL_STAFF, ROLLCALL_ROOMS, ROLLCALL_LOG_DIR
    RUST_LOG           Log filter (default: warn)"
    );
}

// ============================================================================
// Logging
// ============================================================================

/// Initialize the tracing subscriber.
///
/// Stdout belongs to the prompt, so logs go to `rollcall.log` in the log
/// directory. If that directory is unavailable they go to stderr instead.
/// The returned guard must live until exit so buffered lines are flushed.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = config
        .log_dir()
        .and_then(|dir| {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            Ok(dir)
        });

    match log_dir {
        Ok(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            warn!(error = %e, "Logging to stderr");
            None
        }
    }
}

// ============================================================================
// Entry point
// ============================================================================

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_usage();
        return Ok(());
    }
    if cli.show_version {
        println!("rollcall {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (mut config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_env();
    if cli.students.is_some() {
        config.students_file = cli.students;
    }
    if cli.staff.is_some() {
        config.staff_file = cli.staff;
    }
    if cli.rooms.is_some() {
        config.rooms_file = cli.rooms;
    }

    let _guard = init_tracing(&config);
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }
    info!("rollcall starting");

    let mut app = App::new();
    println!("{}", WELCOME);
    for line in render::help() {
        println!("{}", line);
    }
    for line in app.preload(&config) {
        println!("{}", line);
    }

    let mut editor = RustylineEditor::new()?;
    repl::run(&mut app, &mut editor, config.prompt(), &mut io::stdout())?;

    info!("rollcall shutting down");
    Ok(())
}
