use super::*;
use chrono::{Datelike, NaiveDate, Timelike};
use serde_json::json;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn summer() -> NaiveDateTime {
    at(2025, 7, 1, 9, 0)
}

fn showtime(value: serde_json::Value) -> ShowtimeRecord {
    ShowtimeRecord::from_object(value.as_object().unwrap())
}

#[test]
fn test_strict_iso_is_identity_with_offset_dropped() {
    let record = showtime(json!({ "datetime": "2025-08-21T18:15:00+02:00" }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::Iso);

    let fields = resolution.fields(summer());
    assert_eq!(fields.datetime, "2025-08-21T18:15:00");
    assert_eq!(fields.date, "21.08");
    assert_eq!(fields.time, "18:15");
}

#[test]
fn test_scenario_b_repairs_single_digit_hour() {
    let record = showtime(json!({ "datetime": "2025-08-21T8:15:00" }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::RepairedIso);
    assert_eq!(resolution.fields(summer()).datetime, "2025-08-21T08:15:00");
}

#[test]
fn test_scenario_a_swedish_text_through_fuzzy() {
    let record = showtime(json!({ "display_text": "fre 8 aug kl. 18:30" }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::Fuzzy);

    let fields = resolution.fields(summer());
    assert_eq!(fields.date, "08.08");
    assert_eq!(fields.time, "18:30");
}

#[test]
fn test_scenario_c_english_meridiem_is_day_first() {
    let record = showtime(json!({ "display_text": "Sun 24/8 at 4:00 PM" }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::Matcher("english_meridiem"));
    assert_eq!((resolution.instant.day(), resolution.instant.month()), (24, 8));
    assert_eq!(resolution.fields(summer()).time, "16:00");
}

#[test]
fn test_ambiguous_seven_eleven_is_november() {
    let record = showtime(json!({ "display_text": "Fri 7/11 at 4:00 PM" }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.instant.day(), 7);
    assert_eq!(resolution.instant.month(), 11);
    assert_eq!(resolution.instant.hour(), 16);
}

#[test]
fn test_scenario_d_empty_showtime_is_a_miss() {
    let mut collection = json!([{ "title": "Tystnaden", "showtimes": [{ "cinema": "Zita" }] }]);
    let before = collection.clone();

    let stats = normalize_collection(&mut collection, summer()).unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.normalized, 0);
    assert_eq!(stats.missed(), 1);
    assert_eq!(collection, before);
}

#[test]
fn test_year_boundary_in_december() {
    let december = at(2025, 12, 10, 12, 0);
    let record = showtime(json!({ "display_text": "lör 3/1 kl. 18:30" }));
    let resolution = resolve_showtime(&record, december).unwrap();
    assert_eq!(resolution.instant.year(), 2026);
    // Outside the current year the date carries the year.
    assert_eq!(resolution.fields(december).date, "03.01.2026");

    let record = showtime(json!({ "display_text": "lör 13/12 kl. 18:30" }));
    let resolution = resolve_showtime(&record, december).unwrap();
    assert_eq!(resolution.instant.year(), 2025);
    assert_eq!(resolution.fields(december).date, "13.12");
}

#[test]
fn test_original_display_text_is_preferred() {
    let record = showtime(json!({
        "display_text": "Sat 1/11 at 8:00 PM",
        "original_display_text": "lör 1/11 kl. 18:30"
    }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::Matcher("swedish_clock"));
    assert_eq!(resolution.instant.hour(), 18);
}

#[test]
fn test_matchers_run_on_both_fields_before_fuzzy() {
    // The original text only parses fuzzily; the translated one matches a
    // layout, so the matcher wins.
    let record = showtime(json!({
        "display_text": "Sat 1/11 at 8:00 PM",
        "original_display_text": "lördag 1 november 20:00"
    }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::Matcher("english_meridiem"));
}

#[test]
fn test_unparsable_datetime_falls_through_to_display_text() {
    let record = showtime(json!({
        "datetime": "TBA",
        "display_text": "lör 1/11 kl. 18:30"
    }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::Matcher("swedish_clock"));
}

#[test]
fn test_relative_keyword_short_circuits() {
    let record = showtime(json!({ "display_text": "I morgon 19:15" }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::Relative);
    assert_eq!(resolution.instant, at(2025, 7, 2, 19, 15));
}

#[test]
fn test_relative_keyword_reads_meridiem_and_klockan_times() {
    let record = showtime(json!({ "display_text": "Tomorrow at 7:30 PM" }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.strategy, Strategy::Relative);
    assert_eq!(resolution.instant, at(2025, 7, 2, 19, 30));

    let record = showtime(json!({ "display_text": "i morgon kl. 18.30" }));
    let resolution = resolve_showtime(&record, summer()).unwrap();
    assert_eq!(resolution.instant, at(2025, 7, 2, 18, 30));
}

#[test]
fn test_impossible_matcher_date_declines_and_chain_continues() {
    // 31/2 matches the layout but is no date; the fuzzy step also fails.
    let mut record = showtime(json!({ "display_text": "lör 31/2 kl. 18:30" }));
    assert_eq!(resolve_showtime(&record, summer()), None);
    assert!(!normalize_record(&mut record, summer()));
    assert!(!record.is_normalized());
}

#[test]
fn test_normalization_is_idempotent() {
    let mut collection = json!([
        {
            "title": "Persona",
            "showtimes": [
                { "datetime": "2025-08-21T8:15:00" },
                { "display_text": "fre 8 aug kl. 18:30" },
                { "display_text": "Sun 24/8 at 4:00 PM" },
                { "display_text": "slutsålt" }
            ]
        }
    ]);

    let first_stats = normalize_collection(&mut collection, summer()).unwrap();
    let first = collection.clone();
    let second_stats = normalize_collection(&mut collection, summer()).unwrap();

    assert_eq!(collection, first);
    assert_eq!(first_stats, second_stats);
    assert_eq!(first_stats.total, 4);
    assert_eq!(first_stats.normalized, 3);
}

#[test]
fn test_miss_keeps_previous_normalization() {
    let mut record = ShowtimeRecord {
        raw_display_text: Some("inställd".to_string()),
        normalized_datetime: Some("2025-08-08T18:30:00".to_string()),
        normalized_date: Some("08.08".to_string()),
        normalized_time: Some("18:30".to_string()),
        ..Default::default()
    };
    let before = record.clone();
    assert!(!normalize_record(&mut record, summer()));
    assert_eq!(record, before);
}

#[test]
fn test_collection_tolerates_odd_films_and_showtimes() {
    let mut collection = json!([
        { "title": "no showtimes" },
        { "title": "bad showtimes", "showtimes": "soon" },
        "not even an object",
        { "title": "ok", "showtimes": [ "not an object", { "datetime": "2025-09-01T19:00:00" } ] }
    ]);
    let stats = normalize_collection(&mut collection, summer()).unwrap();

    assert_eq!(stats.total, 2);
    assert_eq!(stats.normalized, 1);
    assert_eq!(stats.by_strategy.get("iso"), Some(&1));
    assert_eq!(collection[3]["showtimes"][1]["normalized_time"], "19:00");
    assert_eq!(collection[1]["showtimes"], "soon");
}

#[test]
fn test_non_list_root_is_structural_error() {
    let mut collection = json!({ "films": [] });
    let err = normalize_collection(&mut collection, summer()).unwrap_err();
    assert!(matches!(err, NormalizeError::NotASequence { found: "an object" }));
}

#[test]
fn test_normalize_films_typed_records() {
    let mut films: Vec<FilmRecord> = serde_json::from_value(json!([
        {
            "title": "Stalker",
            "showtimes": [
                { "original_display_text": "tis 2/9 kl. 20:00", "display_text": "Tue 2/9 at 8:00 PM" },
                { "datetime": "" }
            ]
        }
    ]))
    .unwrap();

    let stats = normalize_films(&mut films, summer());
    assert_eq!(stats.total, 2);
    assert_eq!(stats.normalized, 1);
    assert_eq!(stats.by_strategy.get("matcher:swedish_clock"), Some(&1));

    let fields = films[0].showtimes[0].normalized().unwrap();
    assert_eq!(fields.date, "02.09");
    assert_eq!(fields.time, "20:00");
    assert!(!films[0].showtimes[1].is_normalized());
}

#[test]
fn test_stats_merge() {
    let mut total = NormalizeStats::default();
    let mut a = NormalizeStats::default();
    a.record(None);
    let mut b = NormalizeStats::default();
    b.record(Some(&Resolution::new(summer(), Strategy::Fuzzy)));
    total.merge(&a);
    total.merge(&b);

    assert_eq!(total.total, 2);
    assert_eq!(total.normalized, 1);
    assert_eq!(total.by_strategy.get("fuzzy"), Some(&1));
}
