//! In-memory fixed-window rate limiter for verification code issuance

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use sv_core::domain::entities::RateLimitEntry;
use sv_core::services::verification::RateLimiterTrait;
use sv_shared::RateLimitConfig;

/// Fixed-window counter per caller identifier
///
/// Each caller gets `max_requests` issuances per window. The window opens on
/// the caller's first request and resets on the first request after it ends.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    windows: Mutex<HashMap<String, RateLimitEntry>>,
    config: RateLimitConfig,
}

impl InMemoryRateLimiter {
    /// Create a new in-memory rate limiter
    ///
    /// A zero limit or window is raised to one.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            config: config.bounded(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn window(&self) -> Duration {
        Duration::seconds(i64::try_from(self.config.window_seconds).unwrap_or(i64::from(u32::MAX)))
    }

    /// Seconds until the caller's window resets, if the caller has one
    pub async fn retry_after(&self, client_key: &str, now: DateTime<Utc>) -> Option<i64> {
        self.windows
            .lock()
            .await
            .get(client_key)
            .map(|entry| entry.retry_after_seconds(now))
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check_rate_limit(&self, client_key: &str, now: DateTime<Utc>) -> Result<bool, String> {
        let window = self.window();
        let mut windows = self.windows.lock().await;

        let allowed = match windows.get_mut(client_key) {
            Some(entry) => entry.try_acquire(now, window, self.config.max_requests),
            None => {
                windows.insert(client_key.to_string(), RateLimitEntry::start(now, window));
                true
            }
        };

        if !allowed {
            debug!(
                client = client_key,
                limit = self.config.max_requests,
                "Issuance window is full"
            );
        }

        Ok(allowed)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, String> {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, entry| !entry.is_expired(now));
        Ok(before - windows.len())
    }
}
