//! The strategy chain: every way of reading a showtime, tried in a fixed
//! order until one produces an instant.
//!
//! 1. strict ISO-8601 on `datetime`
//! 2. single-digit-hour repair on `datetime`
//! 3. each format matcher on `original_display_text`, then `display_text`
//! 4. translate + relative keyword or fuzzy parse on the same two fields
//!
//! A showtime no strategy can read is a miss: counted, left untouched.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use showtime_models::{FilmRecord, NormalizedFields, ShowtimeRecord};
use tracing::{debug, trace};

use crate::error::{json_type_name, NormalizeError};
use crate::locale::{self, Translation};
use crate::matchers::matchers;
use crate::{fuzzy, iso, repair};

/// Which strategy produced the instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Iso,
    RepairedIso,
    Matcher(&'static str),
    Relative,
    Fuzzy,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Iso => write!(f, "iso"),
            Strategy::RepairedIso => write!(f, "repaired_iso"),
            Strategy::Matcher(name) => write!(f, "matcher:{}", name),
            Strategy::Relative => write!(f, "relative"),
            Strategy::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub instant: NaiveDateTime,
    pub strategy: Strategy,
}

impl Resolution {
    fn new(instant: NaiveDateTime, strategy: Strategy) -> Self {
        Self { instant, strategy }
    }

    pub fn fields(&self, now: NaiveDateTime) -> NormalizedFields {
        NormalizedFields::from_instant(self.instant, now.year())
    }
}

type StrategyFn = fn(&ShowtimeRecord, NaiveDateTime) -> Option<Resolution>;

const CHAIN: [StrategyFn; 4] = [strict_iso, repaired_iso, format_matchers, translated_fuzzy];

fn strict_iso(record: &ShowtimeRecord, _now: NaiveDateTime) -> Option<Resolution> {
    let instant = iso::parse_strict(record.datetime_candidate()?)?;
    Some(Resolution::new(instant, Strategy::Iso))
}

fn repaired_iso(record: &ShowtimeRecord, _now: NaiveDateTime) -> Option<Resolution> {
    let instant = repair::repair_single_digit_hour(record.datetime_candidate()?)?;
    Some(Resolution::new(instant, Strategy::RepairedIso))
}

fn format_matchers(record: &ShowtimeRecord, now: NaiveDateTime) -> Option<Resolution> {
    record.display_candidates().find_map(|text| {
        matchers().into_iter().find_map(|matcher| {
            let instant = matcher.match_parts(text)?.resolve(now)?;
            Some(Resolution::new(instant, Strategy::Matcher(matcher.name())))
        })
    })
}

fn translated_fuzzy(record: &ShowtimeRecord, now: NaiveDateTime) -> Option<Resolution> {
    record.display_candidates().find_map(|text| match locale::translate(text, now) {
        Translation::Resolved(instant) => Some(Resolution::new(instant, Strategy::Relative)),
        Translation::Text(translated) => match fuzzy::parse_fuzzy(&translated, now) {
            Ok(instant) => Some(Resolution::new(instant, Strategy::Fuzzy)),
            Err(e) => {
                trace!(text = %text, error = %e, "Fuzzy parse declined");
                None
            }
        },
    })
}

/// Run the chain on one showtime without touching it.
pub fn resolve_showtime(record: &ShowtimeRecord, now: NaiveDateTime) -> Option<Resolution> {
    CHAIN.iter().find_map(|strategy| strategy(record, now))
}

/// Run the chain and derive the output fields.
pub fn normalize_showtime(record: &ShowtimeRecord, now: NaiveDateTime) -> Option<NormalizedFields> {
    resolve_showtime(record, now).map(|resolution| resolution.fields(now))
}

/// Normalize in place. Returns whether the record was normalized; on a miss
/// the record is left exactly as it was.
pub fn normalize_record(record: &mut ShowtimeRecord, now: NaiveDateTime) -> bool {
    match resolve_showtime(record, now) {
        Some(resolution) => {
            record.apply(resolution.fields(now));
            true
        }
        None => false,
    }
}

/// Per-collection counts of attempted and normalized showtimes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub total: usize,
    pub normalized: usize,
    pub by_strategy: BTreeMap<String, usize>,
}

impl NormalizeStats {
    pub fn missed(&self) -> usize {
        self.total - self.normalized
    }

    fn record(&mut self, resolution: Option<&Resolution>) {
        self.total += 1;
        if let Some(resolution) = resolution {
            self.normalized += 1;
            *self.by_strategy.entry(resolution.strategy.to_string()).or_default() += 1;
        }
    }

    pub fn merge(&mut self, other: &NormalizeStats) {
        self.total += other.total;
        self.normalized += other.normalized;
        for (strategy, count) in &other.by_strategy {
            *self.by_strategy.entry(strategy.clone()).or_default() += count;
        }
    }
}

/// Normalize every showtime of typed film records.
pub fn normalize_films(films: &mut [FilmRecord], now: NaiveDateTime) -> NormalizeStats {
    let mut stats = NormalizeStats::default();
    for film in films.iter_mut() {
        let before = stats.normalized;
        for showtime in film.showtimes.iter_mut() {
            let resolution = resolve_showtime(showtime, now);
            if let Some(resolution) = &resolution {
                showtime.apply(resolution.fields(now));
            }
            stats.record(resolution.as_ref());
        }
        debug!(
            title = film.title().unwrap_or("<untitled>"),
            normalized = stats.normalized - before,
            showtimes = film.showtimes.len(),
            "Normalized film"
        );
    }
    stats
}

/// Normalize a collection as loaded from disk, in place.
///
/// The root must be a list. Films that are not objects, or whose `showtimes`
/// is missing or not a list, are skipped. Showtimes that are not objects
/// count as misses.
pub fn normalize_collection(
    collection: &mut Value,
    now: NaiveDateTime,
) -> Result<NormalizeStats, NormalizeError> {
    let films = match collection {
        Value::Array(films) => films,
        other => {
            return Err(NormalizeError::NotASequence {
                found: json_type_name(other),
            })
        }
    };

    let mut stats = NormalizeStats::default();
    let mut skipped_films = 0;

    for film in films.iter_mut() {
        let Some(showtimes) = film.get_mut("showtimes").and_then(Value::as_array_mut) else {
            skipped_films += 1;
            continue;
        };

        for showtime in showtimes.iter_mut() {
            let Some(object) = showtime.as_object_mut() else {
                stats.record(None);
                continue;
            };

            let record = ShowtimeRecord::from_object(object);
            let resolution = resolve_showtime(&record, now);
            match &resolution {
                Some(resolution) => {
                    resolution.fields(now).write_into(object);
                    debug!(
                        strategy = %resolution.strategy,
                        instant = %resolution.instant,
                        "Normalized showtime"
                    );
                }
                None if !record.has_input() => {
                    trace!("Showtime has no datetime or display text");
                }
                None => {
                    trace!(
                        datetime = ?record.raw_datetime,
                        display_text = ?record.raw_display_text,
                        original_display_text = ?record.raw_original_display_text,
                        "No strategy could read showtime"
                    );
                }
            }
            stats.record(resolution.as_ref());
        }
    }

    if skipped_films > 0 {
        debug!("Skipped {} films without a showtimes list", skipped_films);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests;
