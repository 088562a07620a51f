//! Bulk loading of data files into the registry.
//!
//! A file is read completely before anything is inserted, so a file that
//! cannot be opened or read leaves the registry untouched. After that, each
//! line stands alone: bad lines are skipped with a reason and the rest still
//! load. There is no rollback of lines that loaded before a bad one.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{GuardianWarning, LoadError, RecordError};
use crate::records::{self, RecordKind};
use crate::registry::Registry;

/// What happened to one line of a data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Loaded {
        line_number: usize,
        name: String,
        warnings: Vec<GuardianWarning>,
    },
    Skipped {
        line_number: usize,
        line: String,
        error: RecordError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub kind: RecordKind,
    pub lines: Vec<LineOutcome>,
}

impl LoadReport {
    fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    pub fn loaded_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, LineOutcome::Loaded { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.lines.len() - self.loaded_count()
    }
}

impl Registry {
    /// Load every record in `path`.
    pub fn load_file(&mut self, kind: RecordKind, path: &Path) -> Result<LoadReport, LoadError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LoadError::from_io(path.to_path_buf(), e))?;
        debug!(path = %path.display(), %kind, "Read data file");

        let report = self.load_str(kind, &contents);
        info!(
            path = %path.display(),
            %kind,
            loaded = report.loaded_count(),
            skipped = report.skipped_count(),
            "Finished loading"
        );
        Ok(report)
    }

    /// Load records from already-read text, one per line. Blank lines are
    /// ignored.
    pub fn load_str(&mut self, kind: RecordKind, contents: &str) -> LoadReport {
        let mut report = LoadReport::new(kind);

        for (i, line) in contents.lines().enumerate() {
            let line_number = i + 1;
            if line.trim().is_empty() {
                continue;
            }

            let outcome = match self.load_line(kind, line) {
                Ok((name, warnings)) => LineOutcome::Loaded {
                    line_number,
                    name,
                    warnings,
                },
                Err(error) => {
                    warn!(line_number, %kind, %error, "Skipping line");
                    LineOutcome::Skipped {
                        line_number,
                        line: line.to_string(),
                        error,
                    }
                }
            };
            report.lines.push(outcome);
        }

        report
    }

    fn load_line(
        &mut self,
        kind: RecordKind,
        line: &str,
    ) -> Result<(String, Vec<GuardianWarning>), RecordError> {
        match kind {
            RecordKind::Student => {
                let record = records::parse_student(line)?;
                let name = record.student.name.clone();
                self.add_student(record.student)?;
                Ok((name, record.warnings))
            }
            RecordKind::Staff => {
                let staff = records::parse_staff(line)?;
                let name = staff.name.clone();
                self.add_staff(staff)?;
                Ok((name, Vec::new()))
            }
            RecordKind::Room => {
                let room = records::parse_room(line)?;
                let name = room.name.clone();
                self.add_room(room)?;
                Ok((name, Vec::new()))
            }
        }
    }
}
