//! Date normalization for the handful of formats the source site emits.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Plain date/date-time formats tried in order after the ISO date-time case.
const KNOWN_FORMATS: [(&str, bool); 4] = [
    ("%Y-%m-%d %H:%M:%S", true),
    ("%Y-%m-%d", false),
    ("%m/%d/%Y %H:%M", true),
    ("%m/%d/%Y", false),
];

/// Patterns for fishing a date out of free text, most specific first.
static DATE_TEXT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\d{1,2}/\d{1,2}/\d{4}",
        r"\w+ \d{1,2}, \d{4}",
        r"\d{4}-\d{2}-\d{2}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Normalizes a date string of unknown format to `YYYY-MM-DD HH:MM:SS`.
///
/// Returns the input unchanged when no known format matches; callers decide
/// whether an unnormalized date is acceptable. Never errors.
pub fn normalize_date(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // ISO combined date-times, with a trailing `Z` read as UTC.
    if trimmed.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return dt.format(CANONICAL_FORMAT).to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format(CANONICAL_FORMAT).to_string();
        }
    }

    for (format, has_time) in KNOWN_FORMATS {
        if has_time {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return dt.format(CANONICAL_FORMAT).to_string();
            }
        } else if let Ok(day) = NaiveDate::parse_from_str(trimmed, format) {
            return day
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.format(CANONICAL_FORMAT).to_string())
                .unwrap_or_else(|| trimmed.to_string());
        }
    }

    trimmed.to_string()
}

/// Scans visible text for a date-like fragment and normalizes the first hit.
pub fn parse_date_text(text: &str) -> Option<String> {
    for pattern in DATE_TEXT_PATTERNS.iter() {
        if let Some(found) = pattern.find(text) {
            return Some(normalize_date(found.as_str()));
        }
    }
    None
}
