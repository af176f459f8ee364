//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Longest accepted window in seconds (one day)
pub const MAX_WINDOW_SECONDS: u64 = 86_400;

/// Issuance rate limit applied per caller identifier
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Max verification code requests per caller per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
        }
    }
}

impl RateLimitConfig {
    /// Load from `RATE_LIMIT_MAX_REQUESTS` and `RATE_LIMIT_WINDOW_SECONDS`
    ///
    /// Values outside the accepted ranges are clamped into them.
    pub fn from_env() -> Self {
        Self {
            max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", default_max_requests()),
            window_seconds: env_or("RATE_LIMIT_WINDOW_SECONDS", default_window_seconds()),
        }
        .bounded()
    }

    /// Clamp to at least one request per window and a window of one second
    /// to one day
    pub fn bounded(self) -> Self {
        Self {
            max_requests: self.max_requests.max(1),
            window_seconds: self.window_seconds.clamp(1, MAX_WINDOW_SECONDS),
        }
    }
}

fn default_max_requests() -> u32 {
    3
}

fn default_window_seconds() -> u64 {
    300  // 5 minutes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 3);
        assert_eq!(config.window_seconds, 300);
    }

    #[test]
    fn test_bounded_clamps_out_of_range_values() {
        let config = RateLimitConfig {
            max_requests: 0,
            window_seconds: u64::MAX,
        }
        .bounded();
        assert_eq!(config.max_requests, 1);
        assert_eq!(config.window_seconds, MAX_WINDOW_SECONDS);

        let zero_window = RateLimitConfig {
            max_requests: 3,
            window_seconds: 0,
        }
        .bounded();
        assert_eq!(zero_window.max_requests, 3);
        assert_eq!(zero_window.window_seconds, 1);
    }
}
