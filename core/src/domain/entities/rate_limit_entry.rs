//! Rate limit window for one caller identifier.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Request counter for the current window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitEntry {
    /// Requests made in the current window
    pub count: u32,

    /// When the window resets
    pub reset_at: DateTime<Utc>,
}

impl RateLimitEntry {
    /// Opens a window with the first request already counted
    pub fn start(now: DateTime<Utc>, window: Duration) -> Self {
        Self {
            count: 1,
            reset_at: now + window,
        }
    }

    /// Whether the window has elapsed at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.reset_at
    }

    /// Counts a request against the window
    ///
    /// Returns `false` without changing the counter when the window is full.
    pub fn try_acquire(&mut self, now: DateTime<Utc>, window: Duration, max_requests: u32) -> bool {
        if self.is_expired(now) {
            *self = Self::start(now, window);
            true
        } else if self.count < max_requests {
            self.count += 1;
            true
        } else {
            false
        }
    }

    /// Seconds until the window resets
    pub fn retry_after_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.reset_at - now).num_seconds().max(0)
    }
}
