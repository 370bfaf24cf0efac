use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;

use crate::error::{NudgerError, NudgerResult};

fn hhmm_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}:\d{2}$").expect("HH:MM regex should compile"))
}

/// Parse a 24h `HH:MM` string. Both the shape and the clock value are checked.
pub fn parse_hhmm(input: &str) -> NudgerResult<NaiveTime> {
    if !hhmm_regex().is_match(input) {
        return Err(NudgerError::InvalidTime(input.to_string()));
    }
    NaiveTime::parse_from_str(input, "%H:%M").map_err(|_| NudgerError::InvalidTime(input.to_string()))
}

/// Characters that cannot appear in a file name on common filesystems.
const INVALID_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Calendar name as a single path component: path separators and other
/// invalid characters become `_`, each whitespace run becomes `_`.
pub fn file_stem(calendar_name: &str) -> String {
    let cleaned: String = calendar_name
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    let stem = cleaned.split_whitespace().collect::<Vec<_>>().join("_");

    // A bare "." or ".." stem would still point at a directory.
    if stem.chars().all(|c| c == '.') {
        stem.replace('.', "_")
    } else {
        stem
    }
}

/// Filename for a generated calendar (`My_Cal.ics`).
pub fn create_filename(calendar_name: &str) -> String {
    format!("{}.ics", file_stem(calendar_name))
}

/// Filename for the matching removal calendar (`My_Cal_REMOVE.ics`).
pub fn removal_filename(calendar_name: &str) -> String {
    format!("{}_REMOVE.ics", file_stem(calendar_name))
}
