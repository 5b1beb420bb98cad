//! Count Unique Sources Use Case

use crate::domain::repository::VisitRepository;
use crate::domain::value_objects::{Subject, TimeWindow};
use std::sync::Arc;

/// Count Unique Sources Use Case
///
/// Never fails: an invalid subject or a storage error yields 0. The badge is
/// non-critical, so it stays available when the store is not.
pub struct CountUniqueSourcesUseCase<R>
where
    R: VisitRepository,
{
    visit_repo: Arc<R>,
}

impl<R> CountUniqueSourcesUseCase<R>
where
    R: VisitRepository,
{
    pub fn new(visit_repo: Arc<R>) -> Self {
        Self { visit_repo }
    }

    pub async fn execute(&self, subject: &str, window: &TimeWindow) -> u64 {
        // Re-validated here so direct callers cannot reach the store with
        // an unchecked subject.
        let subject = match Subject::parse(subject) {
            Ok(subject) => subject,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping count for invalid subject");
                return 0;
            }
        };

        match self
            .visit_repo
            .count_distinct_sources(&subject, window)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(
                    subject = %subject,
                    error = %e,
                    "Unique source count failed, reporting 0"
                );
                0
            }
        }
    }
}
