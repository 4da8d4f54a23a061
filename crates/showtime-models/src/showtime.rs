use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::normalized::NormalizedFields;

pub const DATETIME_KEY: &str = "datetime";
pub const DISPLAY_TEXT_KEY: &str = "display_text";
pub const ORIGINAL_DISPLAY_TEXT_KEY: &str = "original_display_text";

/// One scheduled screening as written by a scraper.
///
/// Only the input candidates and the three normalized outputs are typed; every
/// other key the scraper wrote (cinema, ticket url, ...) is kept in `extra` and
/// round-trips untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShowtimeRecord {
    #[serde(rename = "datetime", default, skip_serializing_if = "Option::is_none")]
    pub raw_datetime: Option<String>,
    #[serde(rename = "display_text", default, skip_serializing_if = "Option::is_none")]
    pub raw_display_text: Option<String>,
    #[serde(rename = "original_display_text", default, skip_serializing_if = "Option::is_none")]
    pub raw_original_display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShowtimeRecord {
    /// Read the input candidates out of a raw JSON showtime object.
    ///
    /// Non-string values are treated as absent, so a scraper that wrote
    /// `"datetime": null` or a number never makes the record unreadable.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            raw_datetime: text(DATETIME_KEY),
            raw_display_text: text(DISPLAY_TEXT_KEY),
            raw_original_display_text: text(ORIGINAL_DISPLAY_TEXT_KEY),
            normalized_datetime: text(NormalizedFields::DATETIME_KEY),
            normalized_date: text(NormalizedFields::DATE_KEY),
            normalized_time: text(NormalizedFields::TIME_KEY),
            extra: Map::new(),
        }
    }

    /// The `datetime` candidate, if present and not blank.
    pub fn datetime_candidate(&self) -> Option<&str> {
        non_blank(self.raw_datetime.as_deref())
    }

    /// Display-text candidates in priority order: the untouched source text
    /// first, then `display_text` (which upstream may already have translated).
    pub fn display_candidates(&self) -> impl Iterator<Item = &str> {
        [
            non_blank(self.raw_original_display_text.as_deref()),
            non_blank(self.raw_display_text.as_deref()),
        ]
        .into_iter()
        .flatten()
    }

    pub fn has_input(&self) -> bool {
        self.datetime_candidate().is_some() || self.display_candidates().next().is_some()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized_datetime.is_some()
            && self.normalized_date.is_some()
            && self.normalized_time.is_some()
    }

    pub fn apply(&mut self, fields: NormalizedFields) {
        self.normalized_datetime = Some(fields.datetime);
        self.normalized_date = Some(fields.date);
        self.normalized_time = Some(fields.time);
    }

    pub fn normalized(&self) -> Option<NormalizedFields> {
        Some(NormalizedFields {
            datetime: self.normalized_datetime.clone()?,
            date: self.normalized_date.clone()?,
            time: self.normalized_time.clone()?,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
