use tracing::warn;

use crate::error::GuardianWarning;
use crate::utils::{format_phone, split_fields};

/// Placeholder used for every field of a guardian entry that could not be read.
const UNKNOWN_FIELD: &str = "Unknown";

/// Separator between guardian entries inside the outer `((` ... `))`.
const ENTRY_SEPARATOR: &str = ") (";

/// An authorized pickup contact for a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guardian {
    pub name: String,
    pub relationship_to_child: String,
    pub phone_number: String,
}

impl Guardian {
    pub fn new(
        name: impl Into<String>,
        relationship_to_child: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relationship_to_child: relationship_to_child.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Stand-in for an entry that had fewer than three fields.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_FIELD, UNKNOWN_FIELD, UNKNOWN_FIELD)
    }
}

impl std::fmt::Display for Guardian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}), Phone: {}",
            self.name,
            self.relationship_to_child,
            format_phone(&self.phone_number)
        )
    }
}

/// Result of decoding a guardian block: the guardians plus anything that
/// had to be patched over along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGuardians {
    pub guardians: Vec<Guardian>,
    pub warnings: Vec<GuardianWarning>,
}

/// Decode a guardian block of the form
/// `((name;relation;phone) (name;relation;phone))`.
///
/// `""` and `"none"` (any case) mean no guardians. A block without the
/// double-paren envelope yields no guardians and an `UnexpectedFormat`
/// warning. Entries with fewer than three fields become
/// [`Guardian::unknown`] so the output has one guardian per entry.
pub fn parse_guardians(raw: &str) -> ParsedGuardians {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return ParsedGuardians::default();
    }

    let Some(body) = trimmed
        .strip_prefix("((")
        .and_then(|rest| rest.strip_suffix("))"))
    else {
        warn!(block = %trimmed, "Guardian block has unexpected format");
        return ParsedGuardians {
            guardians: Vec::new(),
            warnings: vec![GuardianWarning::UnexpectedFormat(trimmed.to_string())],
        };
    };

    let mut parsed = ParsedGuardians::default();
    for segment in body.split(ENTRY_SEPARATOR) {
        let fields = split_fields(segment, ';');
        if fields.len() < 3 {
            warn!(entry = %segment, "Malformed guardian entry");
            parsed
                .warnings
                .push(GuardianWarning::MalformedEntry(segment.to_string()));
            parsed.guardians.push(Guardian::unknown());
            continue;
        }
        parsed
            .guardians
            .push(Guardian::new(fields[0], fields[1], fields[2]));
    }
    parsed
}
