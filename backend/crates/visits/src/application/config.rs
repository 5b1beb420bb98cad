//! Application Configuration
//!
//! Configuration for the visits application layer.

use platform::rate_limit::RateLimitConfig;
use std::time::Duration;

/// Default admissions per source per minute
pub const MAX_REQUESTS_PER_MINUTE: u32 = 30;

/// Visits application configuration
#[derive(Debug, Clone)]
pub struct VisitsConfig {
    /// Rate limit: max admitted requests per source per window
    pub rate_limit_max_requests: u32,
    /// Rate limit sliding window
    pub rate_limit_window: Duration,
    /// Interval between sweeps of idle rate limit keys
    pub rate_limit_sweep_interval: Duration,
    /// Honour X-Forwarded-For when resolving the source address
    pub trust_forwarded_for: bool,
}

impl Default for VisitsConfig {
    fn default() -> Self {
        Self {
            rate_limit_max_requests: MAX_REQUESTS_PER_MINUTE,
            rate_limit_window: Duration::from_secs(60),
            rate_limit_sweep_interval: Duration::from_secs(300),
            trust_forwarded_for: false,
        }
    }
}

impl VisitsConfig {
    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.rate_limit_max_requests,
            window: self.rate_limit_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VisitsConfig::default();

        assert_eq!(config.rate_limit_max_requests, 30);
        assert_eq!(config.rate_limit_window, Duration::from_secs(60));
        assert_eq!(config.rate_limit_sweep_interval, Duration::from_secs(300));
        assert!(!config.trust_forwarded_for);
    }

    #[test]
    fn test_rate_limit_mirrors_config() {
        let config = VisitsConfig {
            rate_limit_max_requests: 5,
            rate_limit_window: Duration::from_secs(10),
            ..VisitsConfig::default()
        };

        let limit = config.rate_limit();
        assert_eq!(limit.max_requests, 5);
        assert_eq!(limit.window, Duration::from_secs(10));
    }
}
