//! Domain Entities
//!
//! Core business entities for the visits domain.

use crate::domain::value_objects::Subject;
use chrono::{DateTime, Utc};

/// VisitEvent entity - one recorded badge access
///
/// Events are append-only. Repeat visits from the same source are stored as
/// separate events; deduplication happens when counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEvent {
    pub subject: Subject,
    pub source: String,
    pub occurred_at: DateTime<Utc>,
}

impl VisitEvent {
    pub fn new(subject: Subject, source: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            subject,
            source: source.into(),
            occurred_at,
        }
    }

    pub fn occurred_at_ms(&self) -> i64 {
        self.occurred_at.timestamp_millis()
    }
}
