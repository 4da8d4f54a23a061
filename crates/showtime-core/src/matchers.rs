//! Recognizers for the fixed showtime layouts individual cinemas publish.
//!
//! Both layouts print the day before the month (`24/8` is 24 August).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::parts::{DateParts, Meridiem};

/// One known display-text layout.
pub trait FormatMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Extract date parts, or `None` when the text is not in this layout.
    fn match_parts(&self, text: &str) -> Option<DateParts>;
}

/// `Sun 24/8 at 4:00 PM`
pub struct EnglishMeridiemMatcher;

/// `lör 1/11 kl. 18:30`
pub struct SwedishClockMatcher;

static ENGLISH_MERIDIEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+)\s+(\d{1,2})/(\d{1,2})\s+at\s+(\d{1,2}):(\d{2})\s*((?i:am|pm))")
        .expect("english meridiem pattern is valid")
});

static SWEDISH_CLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+)\s+(\d{1,2})/(\d{1,2})\s+kl\.\s+(\d{1,2}):(\d{2})")
        .expect("swedish clock pattern is valid")
});

impl FormatMatcher for EnglishMeridiemMatcher {
    fn name(&self) -> &'static str {
        "english_meridiem"
    }

    fn match_parts(&self, text: &str) -> Option<DateParts> {
        let caps = ENGLISH_MERIDIEM.captures(text.trim())?;
        let (day, month, hour, minute) = numbers(&caps)?;
        let meridiem = Meridiem::parse(&caps[6])?;
        Some(DateParts::new(day, month, meridiem.to_24_hour(hour), minute))
    }
}

impl FormatMatcher for SwedishClockMatcher {
    fn name(&self) -> &'static str {
        "swedish_clock"
    }

    fn match_parts(&self, text: &str) -> Option<DateParts> {
        let caps = SWEDISH_CLOCK.captures(text)?;
        let (day, month, hour, minute) = numbers(&caps)?;
        Some(DateParts::new(day, month, hour, minute))
    }
}

// Groups 2..=5 are day, month, hour, minute in both layouts.
fn numbers(caps: &Captures) -> Option<(u32, u32, u32, u32)> {
    Some((
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
        caps[4].parse().ok()?,
        caps[5].parse().ok()?,
    ))
}

/// Matchers in the order the orchestrator tries them.
pub fn matchers() -> [&'static dyn FormatMatcher; 2] {
    [&EnglishMeridiemMatcher, &SwedishClockMatcher]
}
