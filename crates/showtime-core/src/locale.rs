//! Swedish → English vocabulary for listings, plus relative-day keywords.

use chrono::{Days, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::fuzzy;

/// Full names come first so `lördag` is never split into `lör` + `dag`.
const VOCABULARY: &[(&str, &str)] = &[
    ("januari", "january"),
    ("februari", "february"),
    ("mars", "march"),
    ("maj", "may"),
    ("juni", "june"),
    ("juli", "july"),
    ("augusti", "august"),
    ("oktober", "october"),
    ("okt", "oct"),
    ("måndag", "monday"),
    ("tisdag", "tuesday"),
    ("onsdag", "wednesday"),
    ("torsdag", "thursday"),
    ("fredag", "friday"),
    ("lördag", "saturday"),
    ("söndag", "sunday"),
    ("mån", "mon"),
    ("tis", "tue"),
    ("ons", "wed"),
    ("tors", "thu"),
    ("tor", "thu"),
    ("fre", "fri"),
    ("lör", "sat"),
    ("sön", "sun"),
];

static VOCABULARY_WORDS: Lazy<Regex> = Lazy::new(|| {
    let alternation = VOCABULARY
        .iter()
        .map(|(swedish, _)| regex::escape(swedish))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("vocabulary pattern is valid")
});

static RELATIVE_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<word>i\s+övermorgon|övermorgon|i\s+morgon|imorgon|tomorrow|i\s+dag|idag|today)\b")
        .expect("relative day pattern is valid")
});

/// Outcome of translating a display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Lower-cased text with Swedish day/month names replaced, ready for the
    /// fuzzy parser.
    Text(String),
    /// A relative keyword ("i morgon") already pinned to an instant; callers
    /// use it as-is.
    Resolved(NaiveDateTime),
}

/// Translate Swedish day/month names, or resolve a relative-day keyword
/// against `now`.
pub fn translate(text: &str, now: NaiveDateTime) -> Translation {
    let lowered = text.to_lowercase();

    if let Some(instant) = resolve_relative(&lowered, now) {
        return Translation::Resolved(instant);
    }

    let translated = VOCABULARY_WORDS.replace_all(&lowered, |caps: &Captures| {
        let word = &caps[0];
        VOCABULARY
            .iter()
            .find(|(swedish, _)| *swedish == word)
            .map(|(_, english)| english.to_string())
            .unwrap_or_else(|| word.to_string())
    });
    Translation::Text(translated.into_owned())
}

fn resolve_relative(lowered: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = RELATIVE_DAY.captures(lowered)?;
    let word: String = caps["word"].split_whitespace().collect::<Vec<_>>().join(" ");
    let offset = match word.as_str() {
        "i övermorgon" | "övermorgon" => 2,
        "i morgon" | "imorgon" | "tomorrow" => 1,
        _ => 0,
    };
    let day = now.date().checked_add_days(Days::new(offset))?;

    // A printed time wins; otherwise keep the current wall-clock time.
    let mut rest = RELATIVE_DAY.replace(lowered, " ").into_owned();
    let time = match fuzzy::take_time(&mut rest) {
        Some((hour, minute, second)) => NaiveTime::from_hms_opt(hour, minute, second)?,
        None => now.time().with_nanosecond(0)?,
    };
    Some(day.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 20)
            .unwrap()
            .and_hms_milli_opt(14, 5, 9, 300)
            .unwrap()
    }

    fn text(t: Translation) -> String {
        match t {
            Translation::Text(s) => s,
            Translation::Resolved(dt) => panic!("expected text, got {}", dt),
        }
    }

    #[test]
    fn test_translates_weekday_and_month_abbreviations() {
        assert_eq!(text(translate("fre 8 aug kl. 18:30", now())), "fri 8 aug kl. 18:30");
        assert_eq!(text(translate("Lör 1 NOVEMBER", now())), "sat 1 november");
    }

    #[test]
    fn test_translates_full_names_before_abbreviations() {
        assert_eq!(
            text(translate("Lördag 3 maj 19:00", now())),
            "saturday 3 may 19:00"
        );
        assert_eq!(text(translate("torsdag 2 oktober", now())), "thursday 2 october");
        assert_eq!(text(translate("tors 2 okt", now())), "thu 2 oct");
    }

    #[test]
    fn test_only_whole_words_are_replaced() {
        // "tor" inside "tornado" and "mars" inside "marsipan" stay put.
        assert_eq!(text(translate("tornado marsipan", now())), "tornado marsipan");
    }

    #[test]
    fn test_tomorrow_with_time() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap().and_hms_opt(19, 15, 0).unwrap();
        assert_eq!(translate("I morgon 19:15", now()), Translation::Resolved(expected));
        assert_eq!(translate("imorgon kl. 19:15", now()), Translation::Resolved(expected));
    }

    #[test]
    fn test_tomorrow_with_meridiem_time() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap().and_hms_opt(19, 30, 0).unwrap();
        assert_eq!(translate("tomorrow 7:30 pm", now()), Translation::Resolved(expected));
        assert_eq!(translate("Tomorrow at 7:30 PM", now()), Translation::Resolved(expected));
        let seven = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap().and_hms_opt(19, 0, 0).unwrap();
        assert_eq!(translate("tomorrow 7pm", now()), Translation::Resolved(seven));
    }

    #[test]
    fn test_tomorrow_with_klockan_dot_time() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap().and_hms_opt(18, 30, 0).unwrap();
        assert_eq!(translate("i morgon kl. 18.30", now()), Translation::Resolved(expected));
    }

    #[test]
    fn test_tomorrow_without_time_keeps_current_clock() {
        let expected = NaiveDate::from_ymd_opt(2025, 8, 21).unwrap().and_hms_opt(14, 5, 9).unwrap();
        assert_eq!(translate("i morgon", now()), Translation::Resolved(expected));
    }

    #[test]
    fn test_today_and_day_after_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 20).unwrap().and_hms_opt(21, 0, 0).unwrap();
        assert_eq!(translate("idag 21:00", now()), Translation::Resolved(today));
        let after = NaiveDate::from_ymd_opt(2025, 8, 22).unwrap().and_hms_opt(17, 0, 0).unwrap();
        assert_eq!(translate("i övermorgon 17:00", now()), Translation::Resolved(after));
    }

    #[test]
    fn test_tomorrow_with_impossible_time_falls_back_to_text() {
        assert_eq!(
            translate("i morgon 25:00", now()),
            Translation::Text("i morgon 25:00".to_string())
        );
    }
}
