//! SQLite Repository Implementation

use crate::domain::entities::VisitEvent;
use crate::domain::repository::VisitRepository;
use crate::domain::value_objects::{Subject, TimeWindow};
use crate::error::VisitsResult;
use sqlx::SqlitePool;

/// SQLite-backed visit event log
#[derive(Clone)]
pub struct SqliteVisitRepository {
    pool: SqlitePool,
}

impl SqliteVisitRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Total number of stored events for a subject
    #[cfg(test)]
    pub(crate) async fn count_events(&self, subject: &Subject) -> VisitsResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM visit_events WHERE subject = ?1",
        )
        .bind(subject.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}

impl VisitRepository for SqliteVisitRepository {
    async fn append(&self, event: &VisitEvent) -> VisitsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO visit_events (
                subject,
                source,
                occurred_at_ms
            ) VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(event.subject.as_str())
        .bind(&event.source)
        .bind(event.occurred_at_ms())
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            subject = %event.subject,
            source = %event.source,
            "Visit recorded"
        );

        Ok(())
    }

    async fn count_distinct_sources(
        &self,
        subject: &Subject,
        window: &TimeWindow,
    ) -> VisitsResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT source)
            FROM visit_events
            WHERE subject = ?1
              AND occurred_at_ms >= ?2
              AND occurred_at_ms < ?3
            "#,
        )
        .bind(subject.as_str())
        .bind(window.start_ms())
        .bind(window.end_ms())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}
