use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::showtime::ShowtimeRecord;

/// A film as listed by one cinema, with its showtimes.
///
/// Identification and metadata (title, url, enrichment) live in `extra`; the
/// normalizer only walks `showtimes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilmRecord {
    #[serde(default)]
    pub showtimes: Vec<ShowtimeRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilmRecord {
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }
}
