//! Repair for timestamps written with a single-digit hour (`2025-08-21T8:15:00`).

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::iso;

static SINGLE_DIGIT_HOUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<date>\d{4}-\d{2}-\d{2}T)(?P<hour>\d):(?P<rest>\d{2}:\d{2}.*)$")
        .expect("single-digit hour pattern is valid")
});

/// Left-pad a single-digit hour and re-run the strict parser.
///
/// Only this one defect is handled; anything else declines.
pub fn repair_single_digit_hour(raw: &str) -> Option<NaiveDateTime> {
    let caps = SINGLE_DIGIT_HOUR.captures(raw.trim())?;
    let repaired = format!("{}0{}:{}", &caps["date"], &caps["hour"], &caps["rest"]);
    tracing::trace!(raw = %raw, repaired = %repaired, "Padded single-digit hour");
    iso::parse_strict(&repaired)
}
