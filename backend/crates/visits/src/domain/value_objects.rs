//! Domain Value Objects
//!
//! Immutable value types for the visits domain.

use chrono::{DateTime, Utc};
use std::fmt;

/// Error returned when subject validation fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    #[error("Subject is empty")]
    Empty,

    #[error("Invalid character {ch:?} at position {index}")]
    InvalidCharacter { ch: char, index: usize },
}

/// Subject - the profile a badge counts visitors for
///
/// Only ASCII letters, digits, `_` and `-` are accepted. The value ends up in
/// storage lookups, so anything else is refused outright.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject(String);

impl Subject {
    pub fn parse(raw: &str) -> Result<Self, SubjectError> {
        if raw.is_empty() {
            return Err(SubjectError::Empty);
        }

        if let Some((index, ch)) = raw.char_indices().find(|(_, c)| !is_subject_char(*c)) {
            return Err(SubjectError::InvalidCharacter { ch, index });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Predicate form of [`Subject::parse`]
pub fn is_valid_subject(raw: &str) -> bool {
    Subject::parse(raw).is_ok()
}

fn is_subject_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Named trailing period a badge covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    LastMonth,
    LastWeek,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::LastMonth => "last_month",
            Period::LastWeek => "last_week",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }
}
