//! Rate Limiting Infrastructure
//!
//! Per-key sliding-window admission control.
//!
//! Every key owns the timestamps of its recently admitted requests. A check
//! prunes timestamps older than the window, rejects when the remaining count
//! has reached the limit, and otherwise records the new request. Rejected
//! attempts are never recorded, so a client hammering the endpoint regains
//! access as soon as its oldest admitted request ages out.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 30,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// Admissions left in the current window (after this request)
    pub remaining: u32,
    /// Time until the oldest active request leaves the window
    pub retry_after: Duration,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check and increment rate limit counter
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

/// Process-local sliding-window store.
///
/// A single mutex guards the whole map. The critical section is bounded by
/// `max_requests`, so contention stays negligible at the sizes this is used
/// for, and the prune-check-record sequence is atomic per key.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    windows: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one request for `key` at the given instant.
    pub fn check_at(&self, key: &str, config: &RateLimitConfig, now: Instant) -> RateLimitResult {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let timestamps = windows.entry(key.to_string()).or_default();

        prune(timestamps, config.window, now);

        let active = timestamps.len() as u32;
        if active >= config.max_requests {
            let retry_after = time_until_slot(timestamps, config.window, now);

            tracing::debug!(
                key = %key,
                count = active,
                max = config.max_requests,
                "Rate limit exceeded"
            );

            return RateLimitResult {
                allowed: false,
                remaining: 0,
                retry_after,
            };
        }

        timestamps.push_back(now);

        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - active - 1,
            retry_after: time_until_slot(timestamps, config.window, now),
        }
    }

    /// Drop keys whose window is empty once pruned.
    ///
    /// Returns the number of keys removed.
    pub fn sweep(&self, window: Duration, now: Instant) -> usize {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let before = windows.len();
        windows.retain(|_, timestamps| {
            prune(timestamps, window, now);
            !timestamps.is_empty()
        });
        before - windows.len()
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check_at(key, config, Instant::now()))
    }
}

fn prune(timestamps: &mut VecDeque<Instant>, window: Duration, now: Instant) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

fn time_until_slot(timestamps: &VecDeque<Instant>, window: Duration, now: Instant) -> Duration {
    timestamps
        .front()
        .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
        .unwrap_or(window)
}
