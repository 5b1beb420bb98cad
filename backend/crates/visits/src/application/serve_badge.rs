//! Serve Badge Use Case

use crate::application::config::VisitsConfig;
use crate::application::count_unique::CountUniqueSourcesUseCase;
use crate::domain::entities::VisitEvent;
use crate::domain::repository::VisitRepository;
use crate::domain::services::window_for;
use crate::domain::value_objects::{Period, Subject};
use crate::error::{VisitsError, VisitsResult};
use chrono::{DateTime, Utc};
use platform::badge::render_badge;
use platform::rate_limit::RateLimitStore;
use std::sync::Arc;
use std::time::Duration;

/// Input DTO for serve badge
#[derive(Debug, Clone)]
pub struct ServeBadgeInput {
    pub subject: String,
    pub source: String,
    pub period: Period,
    pub now: DateTime<Utc>,
}

/// Output DTO for serve badge
#[derive(Debug, Clone)]
pub struct ServeBadgeOutput {
    pub png: Vec<u8>,
    pub unique_sources: u64,
}

/// Serve Badge Use Case
///
/// Cheapest checks run first: subject validation, then admission, then the
/// storage round trips.
pub struct ServeBadgeUseCase<R, L>
where
    R: VisitRepository,
    L: RateLimitStore,
{
    visit_repo: Arc<R>,
    rate_limiter: Arc<L>,
    config: Arc<VisitsConfig>,
}

impl<R, L> ServeBadgeUseCase<R, L>
where
    R: VisitRepository,
    L: RateLimitStore,
{
    pub fn new(visit_repo: Arc<R>, rate_limiter: Arc<L>, config: Arc<VisitsConfig>) -> Self {
        Self {
            visit_repo,
            rate_limiter,
            config,
        }
    }

    pub async fn execute(&self, input: ServeBadgeInput) -> VisitsResult<ServeBadgeOutput> {
        let subject = Subject::parse(&input.subject).map_err(|e| {
            tracing::debug!(error = %e, "Invalid subject");
            VisitsError::InvalidSubject
        })?;

        let decision = self
            .rate_limiter
            .check_and_increment(&input.source, &self.config.rate_limit())
            .await
            .map_err(|e| VisitsError::Internal(format!("rate limiter: {e}")))?;

        if !decision.allowed {
            return Err(VisitsError::RateLimitExceeded {
                retry_after_secs: retry_after_secs(decision.retry_after),
            });
        }

        let window = window_for(input.period, input.now).ok_or_else(|| {
            VisitsError::Internal(format!("{} window out of range", input.period))
        })?;

        let unique_sources = CountUniqueSourcesUseCase::new(self.visit_repo.clone())
            .execute(subject.as_str(), &window)
            .await;

        let png = render_badge(unique_sources)?;

        let event = VisitEvent::new(subject, input.source, input.now);
        if let Err(e) = self.visit_repo.append(&event).await {
            tracing::error!(
                subject = %event.subject,
                source = %event.source,
                error = %e,
                "Failed to record visit"
            );
        }

        tracing::info!(
            subject = %event.subject,
            period = %input.period,
            unique_sources,
            "Served badge"
        );

        Ok(ServeBadgeOutput {
            png,
            unique_sources,
        })
    }
}

/// Whole seconds until retry, rounded up and never zero
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}
