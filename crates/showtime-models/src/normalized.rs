use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three output fields derived from one resolved instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedFields {
    /// ISO-8601 local wall-clock time, no offset.
    pub datetime: String,
    /// `DD.MM`, or `DD.MM.YYYY` outside the current year.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub time: String,
}

impl NormalizedFields {
    pub const DATETIME_KEY: &'static str = "normalized_datetime";
    pub const DATE_KEY: &'static str = "normalized_date";
    pub const TIME_KEY: &'static str = "normalized_time";

    pub fn from_instant(instant: NaiveDateTime, current_year: i32) -> Self {
        // Microsecond precision; anything finer is dropped.
        let datetime = if instant.nanosecond() / 1_000 == 0 {
            instant.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            instant.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        };
        let date = if instant.year() == current_year {
            instant.format("%d.%m").to_string()
        } else {
            instant.format("%d.%m.%Y").to_string()
        };

        Self {
            datetime,
            date,
            time: instant.format("%H:%M").to_string(),
        }
    }

    /// Write the fields into a raw JSON showtime object, replacing any
    /// previous normalization and leaving every other key alone.
    pub fn write_into(&self, object: &mut Map<String, Value>) {
        object.insert(Self::DATETIME_KEY.to_string(), Value::String(self.datetime.clone()));
        object.insert(Self::DATE_KEY.to_string(), Value::String(self.date.clone()));
        object.insert(Self::TIME_KEY.to_string(), Value::String(self.time.clone()));
    }
}
