//! Partially-specified dates and the shared year-inference rule.
//!
//! Matchers and the fuzzy parser only extract numbers; turning them into an
//! instant (and picking a year when the listing did not print one) happens
//! here, once.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::FuzzyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().trim_end_matches('.').to_ascii_lowercase().as_str() {
            "am" | "a.m" | "a" => Some(Meridiem::Am),
            "pm" | "p.m" | "p" => Some(Meridiem::Pm),
            _ => None,
        }
    }

    /// 12 PM stays 12, 12 AM becomes 0, other PM hours gain 12.
    pub fn to_24_hour(self, hour: u32) -> u32 {
        match (self, hour) {
            (Meridiem::Pm, h) if h != 12 => h + 12,
            (Meridiem::Am, 12) => 0,
            (_, h) => h,
        }
    }
}

/// A calendar date and wall-clock time as read from a listing, with the year
/// only present when the source printed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: Option<i32>,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl DateParts {
    pub fn new(day: u32, month: u32, hour: u32, minute: u32) -> Self {
        Self {
            year: None,
            month,
            day,
            hour,
            minute,
            second: 0,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn year_for(&self, now: NaiveDateTime) -> i32 {
        self.year.unwrap_or_else(|| infer_year(self.month, now))
    }

    /// Resolve to an instant, inferring the year when absent.
    pub fn resolve(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.try_resolve(now).ok()
    }

    pub fn try_resolve(&self, now: NaiveDateTime) -> Result<NaiveDateTime, FuzzyError> {
        let year = self.year_for(now);
        let date = NaiveDate::from_ymd_opt(year, self.month, self.day).ok_or(FuzzyError::InvalidDate {
            year,
            month: self.month,
            day: self.day,
        })?;
        date.and_hms_opt(self.hour, self.minute, self.second)
            .ok_or(FuzzyError::InvalidTime {
                hour: self.hour,
                minute: self.minute,
                second: self.second,
            })
    }
}

/// Year for a listing that printed no year.
///
/// Listings are near-future, so a month before the current one means next
/// year (scraping in December for a January screening). This misfires for
/// same-year dates scraped months in advance of an earlier-numbered month;
/// kept as a known approximation.
pub fn infer_year(month: u32, now: NaiveDateTime) -> i32 {
    if month < now.month() {
        now.year() + 1
    } else {
        now.year()
    }
}
