//! HTTP Handlers

use crate::application::config::VisitsConfig;
use crate::application::serve_badge::{ServeBadgeInput, ServeBadgeUseCase};
use crate::domain::repository::VisitRepository;
use crate::domain::value_objects::Period;
use crate::error::{VisitsError, VisitsResult};
use axum::extract::rejection::PathRejection;
use axum::extract::{ConnectInfo, FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use platform::client::source_identifier;
use platform::rate_limit::RateLimitStore;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

/// Shared state for badge handlers
pub struct BadgeAppState<R, L>
where
    R: VisitRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub rate_limiter: Arc<L>,
    pub config: Arc<VisitsConfig>,
}

impl<R, L> Clone for BadgeAppState<R, L>
where
    R: VisitRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            rate_limiter: self.rate_limiter.clone(),
            config: self.config.clone(),
        }
    }
}

/// Transport-level peer address, if the server recorded one
#[derive(Debug, Clone, Copy)]
pub struct PeerIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for PeerIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        Ok(PeerIp(ip))
    }
}

/// GET /{subject}/last_month
pub async fn last_month_badge<R, L>(
    State(state): State<BadgeAppState<R, L>>,
    subject: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    peer: PeerIp,
) -> VisitsResult<Response>
where
    R: VisitRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let subject = subject_from_path(subject)?;
    serve_badge(state, subject, Period::LastMonth, &headers, peer).await
}

/// GET /{subject}/last_week
pub async fn last_week_badge<R, L>(
    State(state): State<BadgeAppState<R, L>>,
    subject: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    peer: PeerIp,
) -> VisitsResult<Response>
where
    R: VisitRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let subject = subject_from_path(subject)?;
    serve_badge(state, subject, Period::LastWeek, &headers, peer).await
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// A subject that does not even decode (e.g. invalid UTF-8) is just another
/// invalid subject.
fn subject_from_path(subject: Result<Path<String>, PathRejection>) -> VisitsResult<String> {
    subject.map(|Path(subject)| subject).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable subject");
        VisitsError::InvalidSubject
    })
}

async fn serve_badge<R, L>(
    state: BadgeAppState<R, L>,
    subject: String,
    period: Period,
    headers: &HeaderMap,
    peer: PeerIp,
) -> VisitsResult<Response>
where
    R: VisitRepository + Send + Sync + 'static,
    L: RateLimitStore + Send + Sync + 'static,
{
    let source = source_identifier(headers, peer.0, state.config.trust_forwarded_for);

    let use_case = ServeBadgeUseCase::new(
        state.repo.clone(),
        state.rate_limiter.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(ServeBadgeInput {
            subject,
            source,
            period,
            now: chrono::Utc::now(),
        })
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        output.png,
    )
        .into_response())
}
