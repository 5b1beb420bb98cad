//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-time errors are
//! `visits::VisitsError`.

use anyhow::Context;
use axum::Router;
use platform::rate_limit::InMemoryRateLimitStore;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visits::{SqliteVisitRepository, VisitsConfig, badge_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,visits=info,platform=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://profiles.db".to_string());

    let connect_options = SqliteConnectOptions::from_str(&database_url)
        .with_context(|| format!("invalid DATABASE_URL: {database_url}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    tracing::info!(database_url = %database_url, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let config = VisitsConfig {
        rate_limit_max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", 30)?,
        rate_limit_window: Duration::from_secs(env_or("RATE_LIMIT_WINDOW_SECS", 60)?),
        rate_limit_sweep_interval: Duration::from_secs(env_or("RATE_LIMIT_SWEEP_SECS", 300)?),
        trust_forwarded_for: env_or("TRUST_FORWARDED_FOR", false)?,
    };

    let rate_limiter = Arc::new(InMemoryRateLimitStore::new());
    spawn_rate_limit_sweeper(rate_limiter.clone(), &config);

    // Build router
    let app = Router::new()
        .merge(badge_router(
            SqliteVisitRepository::new(pool),
            rate_limiter,
            config,
        ))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = env_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 5000)))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Periodically drop rate limit entries for sources that went quiet
fn spawn_rate_limit_sweeper(rate_limiter: Arc<InMemoryRateLimitStore>, config: &VisitsConfig) {
    let window = config.rate_limit_window;
    let period = config.rate_limit_sweep_interval.max(Duration::from_secs(1));
    let mut interval = tokio::time::interval(period);

    tokio::spawn(async move {
        // First tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let removed = rate_limiter.sweep(window, Instant::now());
            tracing::debug!(
                removed,
                tracked = rate_limiter.tracked_keys(),
                "Rate limit sweep completed"
            );
        }
    });
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
