use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that are fatal for one collection file.
///
/// Showtimes that no strategy can read are not errors; they are counted as
/// misses in [`NormalizeStats`](crate::NormalizeStats).
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {} as JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a list of films at the top level, found {found}")]
    NotASequence { found: &'static str },

    #[error("failed to serialize collection for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list data directory {}: {source}", path.display())]
    Discover {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NormalizeError {
    /// Persistence failures happen after the in-memory transform succeeded.
    pub fn is_persistence(&self) -> bool {
        matches!(self, NormalizeError::Serialize { .. } | NormalizeError::Write { .. })
    }
}

/// Why the fuzzy parser could not read a piece of text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FuzzyError {
    #[error("empty input")]
    Empty,

    #[error("no date or time found in {0:?}")]
    NoDateOrTime(String),

    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("{hour:02}:{minute:02}:{second:02} is not a time of day")]
    InvalidTime { hour: u32, minute: u32, second: u32 },
}

/// JSON type name used in structural error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
