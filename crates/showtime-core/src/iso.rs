//! Strict ISO-8601 parsing of the machine-readable `datetime` candidate.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// Two-digit hour/minute/second fields only; a single-digit hour is the
// repairer's job, not ours.
static ISO_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<date>\d{4}-\d{2}-\d{2})(?:[T ](?P<time>\d{2}:\d{2}(?::\d{2}(?:[.,]\d{1,9})?)?))?(?P<offset>Z|z|[+-]\d{2}(?::?\d{2})?)?$",
    )
    .expect("ISO shape pattern is valid")
});

/// Parse an ISO-8601 timestamp, returning local wall-clock time.
///
/// Any UTC offset is validated for shape and then dropped: `18:30+02:00`
/// becomes `18:30`, not `16:30`.
pub fn parse_strict(raw: &str) -> Option<NaiveDateTime> {
    let caps = ISO_SHAPE.captures(raw.trim())?;
    let date = NaiveDate::parse_from_str(&caps["date"], "%Y-%m-%d").ok()?;

    let Some(time) = caps.name("time") else {
        // Offset without a time is not ISO-8601.
        if caps.name("offset").is_some() {
            return None;
        }
        return date.and_hms_opt(0, 0, 0);
    };

    let time = time.as_str().replace(',', ".");
    let joined = format!("{}T{}", date.format("%Y-%m-%d"), time);
    let format = if time.len() == 5 { "%Y-%m-%dT%H:%M" } else { "%Y-%m-%dT%H:%M:%S%.f" };
    NaiveDateTime::parse_from_str(&joined, format).ok()
}
