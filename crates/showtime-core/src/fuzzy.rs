//! Last-resort parser for loosely formatted, already-translated display text.
//!
//! Unknown words are skipped. Numeric date pairs are read day first; only a
//! pair that cannot be day/month (`8/24`) is read month/day.

use chrono::{Datelike, Days, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FuzzyError;
use crate::parts::{DateParts, Meridiem};

static DATE_TIME_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)t(\d)").expect("separator pattern is valid"));

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("iso date pattern is valid")
});

// Swedish listings write "kl. 18.30" as well as "kl. 18:30".
static KLOCKAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bkl\.?\s*(\d{1,2})[.:](\d{2})\b").expect("klockan pattern is valid")
});

static CLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}):(\d{2})(?::(\d{2}))?(?:\s*([ap])\.?m\b\.?)?")
        .expect("clock pattern is valid")
});

static BARE_MERIDIEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})\s*([ap])\.?m\b\.?").expect("bare meridiem pattern is valid")
});

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})[/.\-](\d{1,2})(?:[/.\-](\d{4}|\d{2}))?\b")
        .expect("numeric date pattern is valid")
});

static ORDINAL_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)$").expect("ordinal pattern is valid"));

#[derive(Debug, Default)]
struct Extracted {
    date: Option<(Option<i32>, u32, u32)>,
    time: Option<(u32, u32, u32)>,
    month: Option<u32>,
    day: Option<u32>,
    year: Option<i32>,
    weekday: Option<Weekday>,
}

/// Parse free text into a local instant, day-first.
///
/// Dates without a year go through [`infer_year`](crate::infer_year). A
/// weekday alone means its next occurrence on or after `now`; a time alone
/// means today. Text with neither a date nor a time is an error.
pub fn parse_fuzzy(text: &str, now: NaiveDateTime) -> Result<NaiveDateTime, FuzzyError> {
    let lowered = text.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(FuzzyError::Empty);
    }

    let mut rest = DATE_TIME_SEPARATOR.replace_all(&lowered, "$1 $2").into_owned();
    let mut found = Extracted::default();

    if let Some((caps, range)) = first_match(&ISO_DATE, &rest) {
        found.date = Some((Some(caps[0]), caps[1] as u32, caps[2] as u32));
        rest.replace_range(range, " ");
    }

    found.time = take_time(&mut rest);

    if found.date.is_none() {
        if let Some((caps, range)) = first_match(&NUMERIC_DATE, &rest) {
            if let Some((day, month)) = day_first(caps[0] as u32, caps[1] as u32) {
                let year = caps.get(2).copied().map(expand_year);
                found.date = Some((year, month, day));
            }
            rest.replace_range(range, " ");
        }
    }

    read_words(&rest, &mut found);
    assemble(found, &lowered, now)
}

pub(crate) fn take_time(rest: &mut String) -> Option<(u32, u32, u32)> {
    if let Some((caps, range)) = first_match(&KLOCKAN, rest) {
        rest.replace_range(range, " ");
        return Some((caps[0] as u32, caps[1] as u32, 0));
    }

    if let Some(caps) = CLOCK.captures(rest) {
        let range = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let hour: u32 = caps[1].parse().unwrap_or_default();
        let minute: u32 = caps[2].parse().unwrap_or_default();
        let second: u32 = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        let hour = match caps.get(4).and_then(|m| Meridiem::parse(m.as_str())) {
            Some(meridiem) => meridiem.to_24_hour(hour),
            None => hour,
        };
        rest.replace_range(range, " ");
        return Some((hour, minute, second));
    }

    if let Some(caps) = BARE_MERIDIEM.captures(rest) {
        let range = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let hour: u32 = caps[1].parse().unwrap_or_default();
        let meridiem = Meridiem::parse(&caps[2]).unwrap_or(Meridiem::Am);
        rest.replace_range(range, " ");
        return Some((meridiem.to_24_hour(hour), 0, 0));
    }

    None
}

// All capture groups after the whole match, as numbers. Absent optional
// groups are dropped from the end.
fn first_match(pattern: &Regex, text: &str) -> Option<(Vec<i32>, std::ops::Range<usize>)> {
    let caps = pattern.captures(text)?;
    let range = caps.get(0)?.range();
    let numbers = caps
        .iter()
        .skip(1)
        .map_while(|group| group.and_then(|m| m.as_str().parse::<i32>().ok()))
        .collect();
    Some((numbers, range))
}

/// Day first unless that is impossible and month first is not.
fn day_first(first: u32, second: u32) -> Option<(u32, u32)> {
    if (1..=31).contains(&first) && (1..=12).contains(&second) {
        Some((first, second))
    } else if (1..=12).contains(&first) && (13..=31).contains(&second) {
        Some((second, first))
    } else {
        None
    }
}

fn expand_year(year: i32) -> i32 {
    if year < 100 {
        2000 + year
    } else {
        year
    }
}

fn read_words(rest: &str, found: &mut Extracted) {
    let tokens: Vec<&str> = rest
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    let month_index = tokens.iter().position(|t| month_number(t).is_some());
    if let Some(index) = month_index {
        found.month = month_number(tokens[index]);
        // The day printed next to the month name beats any other number.
        let neighbours = [index.checked_sub(1), Some(index + 1)];
        found.day = neighbours
            .into_iter()
            .flatten()
            .filter_map(|i| tokens.get(i))
            .find_map(|t| day_number(t));
    }

    for token in &tokens {
        if found.weekday.is_none() {
            if let Some(weekday) = weekday(token) {
                found.weekday = Some(weekday);
                continue;
            }
        }
        if found.year.is_none() && token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()) {
            found.year = token.parse().ok();
            continue;
        }
        if found.day.is_none() {
            found.day = day_number(token);
        }
    }
}

fn assemble(found: Extracted, original: &str, now: NaiveDateTime) -> Result<NaiveDateTime, FuzzyError> {
    let (hour, minute, second) = found.time.unwrap_or((0, 0, 0));
    let with_time = |parts: DateParts| DateParts { hour, minute, second, ..parts };

    if let Some((year, month, day)) = found.date {
        let mut parts = with_time(DateParts::new(day, month, 0, 0));
        parts.year = year;
        return parts.try_resolve(now);
    }

    if let (Some(month), Some(day)) = (found.month, found.day) {
        let mut parts = with_time(DateParts::new(day, month, 0, 0));
        parts.year = found.year;
        return parts.try_resolve(now);
    }

    let time = || {
        NaiveTime::from_hms_opt(hour, minute, second).ok_or(FuzzyError::InvalidTime {
            hour,
            minute,
            second,
        })
    };

    if let Some(weekday) = found.weekday {
        let today = now.date();
        let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
        let date = today
            .checked_add_days(Days::new(u64::from(ahead)))
            .ok_or_else(|| FuzzyError::NoDateOrTime(original.to_string()))?;
        return Ok(date.and_time(time()?));
    }

    if found.time.is_some() {
        return Ok(now.date().and_time(time()?));
    }

    Err(FuzzyError::NoDateOrTime(original.to_string()))
}

fn month_number(token: &str) -> Option<u32> {
    let month = match token {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday(token: &str) -> Option<Weekday> {
    let weekday = match token {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

fn day_number(token: &str) -> Option<u32> {
    let digits = match ORDINAL_DAY.captures(token) {
        Some(caps) => caps.get(1)?.as_str(),
        None if token.len() <= 2 && token.chars().all(|c| c.is_ascii_digit()) => token,
        None => return None,
    };
    digits.parse().ok().filter(|d| (1..=31).contains(d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn now() -> NaiveDateTime {
        // A Wednesday.
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn ymdhm(dt: NaiveDateTime) -> (i32, u32, u32, u32, u32) {
        (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute())
    }

    #[test]
    fn test_day_month_name_with_klockan() {
        let dt = parse_fuzzy("fri 8 aug kl. 18:30", now()).unwrap();
        assert_eq!(ymdhm(dt), (2025, 8, 8, 18, 30));
    }

    #[test]
    fn test_ambiguous_numeric_pair_is_day_first() {
        let dt = parse_fuzzy("7/11 19:00", now()).unwrap();
        assert_eq!((dt.day(), dt.month()), (7, 11));
        let dt = parse_fuzzy("3.9 kl 18.30", now()).unwrap();
        assert_eq!(ymdhm(dt), (2025, 9, 3, 18, 30));
    }

    #[test]
    fn test_impossible_day_first_pair_falls_back_to_month_first() {
        let dt = parse_fuzzy("8/24 20:00", now()).unwrap();
        assert_eq!((dt.day(), dt.month()), (24, 8));
    }

    #[test]
    fn test_month_name_then_day_and_year() {
        let dt = parse_fuzzy("saturday, november 1st 2026, 6:30 pm", now()).unwrap();
        assert_eq!(ymdhm(dt), (2026, 11, 1, 18, 30));
    }

    #[test]
    fn test_earlier_month_without_year_is_next_year() {
        let dt = parse_fuzzy("tue 14 jan 19:00", now()).unwrap();
        assert_eq!(ymdhm(dt), (2026, 1, 14, 19, 0));
    }

    #[test]
    fn test_numeric_date_with_short_year() {
        let dt = parse_fuzzy("24/8/25 16:00", now()).unwrap();
        assert_eq!(ymdhm(dt), (2025, 8, 24, 16, 0));
    }

    #[test]
    fn test_iso_date_with_t_separator() {
        let dt = parse_fuzzy("2025-09-01t19:45", now()).unwrap();
        assert_eq!(ymdhm(dt), (2025, 9, 1, 19, 45));
    }

    #[test]
    fn test_day_next_to_month_wins_over_other_numbers() {
        let dt = parse_fuzzy("sal 2 fri 29 aug 21:00", now()).unwrap();
        assert_eq!((dt.day(), dt.month()), (29, 8));
    }

    #[test]
    fn test_weekday_alone_is_next_occurrence() {
        let dt = parse_fuzzy("friday 20:00", now()).unwrap();
        assert_eq!(ymdhm(dt), (2025, 8, 22, 20, 0));
        let dt = parse_fuzzy("wednesday 9pm", now()).unwrap();
        assert_eq!(ymdhm(dt), (2025, 8, 20, 21, 0));
    }

    #[test]
    fn test_time_alone_is_today() {
        let dt = parse_fuzzy("kl. 18:30", now()).unwrap();
        assert_eq!(ymdhm(dt), (2025, 8, 20, 18, 30));
    }

    #[test]
    fn test_missing_time_is_midnight() {
        let dt = parse_fuzzy("12 september", now()).unwrap();
        assert_eq!(ymdhm(dt), (2025, 9, 12, 0, 0));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_fuzzy("   ", now()), Err(FuzzyError::Empty));
        assert!(matches!(parse_fuzzy("slutsålt", now()), Err(FuzzyError::NoDateOrTime(_))));
        assert!(matches!(
            parse_fuzzy("31 feb 18:00", now()),
            Err(FuzzyError::InvalidDate { month: 2, day: 31, .. })
        ));
        assert!(matches!(parse_fuzzy("fri 25:00", now()), Err(FuzzyError::InvalidTime { .. })));
    }
}
