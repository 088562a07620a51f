/// Canonical lookup key for a person or room name.
///
/// Every index insert and every lookup goes through this function, so
/// `"ann lee"`, `"Ann Lee"` and `" ANN LEE "` all resolve to the same entry.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Case-insensitive substring test. `needle` should already be lowercased.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Split `text` on `separator` and trim each field.
///
/// Trailing empty fields are dropped before trimming, so `"a,b,"` has two
/// fields while `"a,b, "` still has three.
pub fn split_fields(text: &str, separator: char) -> Vec<&str> {
    let mut fields: Vec<&str> = text.split(separator).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields.into_iter().map(str::trim).collect()
}

/// Format a phone number for display
/// Handles various input formats and normalizes to (XXX) XXX-XXXX
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!(
            "({}) {}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..10]
        ),
        11 if digits.starts_with('1') => format!(
            "({}) {}-{}",
            &digits[1..4],
            &digits[4..7],
            &digits[7..11]
        ),
        _ => phone.to_string(), // Local or partial numbers stay as entered
    }
}
