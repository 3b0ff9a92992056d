//! Error types for uniweek.

use std::path::PathBuf;

/// Everything that can go wrong while building a timetable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The date does not look like `dd.mm.yyyy`.
    #[error("date `{input}` is not in dd.mm.yyyy format")]
    DateFormat {
        /// What the user typed.
        input: String,
    },

    /// The date has the right shape but does not exist (i.e. 31.02.2025).
    #[error("date `{input}` is not a valid calendar date")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The week and day land outside the dates the calendar can hold.
    #[error("week {week} day {day} is out of the calendar range")]
    DateOutOfRange { week: i64, day: i64 },

    /// The clock window of a lesson does not fit in its calendar day.
    #[error("lesson {ordinal} does not fit in a single day")]
    LessonOutOfDay { ordinal: i64 },

    /// Nothing tells us where to read the raw schedule from.
    #[error("no schedule source configured, use --source or --input")]
    NoSource,

    #[error("can't reach schedule server: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed schedule payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("can't read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
