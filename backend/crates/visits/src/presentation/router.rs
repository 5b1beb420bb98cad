//! Badge Router

use crate::application::config::VisitsConfig;
use crate::domain::repository::VisitRepository;
use crate::infra::sqlite::SqliteVisitRepository;
use crate::presentation::handlers::{self, BadgeAppState};
use axum::{Router, routing::get};
use platform::rate_limit::{InMemoryRateLimitStore, RateLimitStore};
use std::sync::Arc;

/// Create the badge router with the SQLite repository
pub fn badge_router(
    repo: SqliteVisitRepository,
    rate_limiter: Arc<InMemoryRateLimitStore>,
    config: VisitsConfig,
) -> Router {
    badge_router_generic(repo, rate_limiter, config)
}

/// Create a generic badge router for any repository and limiter
pub fn badge_router_generic<R, L>(repo: R, rate_limiter: Arc<L>, config: VisitsConfig) -> Router
where
    R: VisitRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let state = BadgeAppState {
        repo: Arc::new(repo),
        rate_limiter,
        config: Arc::new(config),
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/{subject}/last_month",
            get(handlers::last_month_badge::<R, L>),
        )
        .route("/{subject}/last_week", get(handlers::last_week_badge::<R, L>))
        .with_state(state)
}
