//! Per-username login throttling

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Maximum number of attempts allowed
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_duration_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,
            ban_duration_seconds: 3600,
        }
    }
}

#[derive(Debug)]
struct Attempts {
    count: u32,
    last_attempt: Instant,
    banned_until: Option<Instant>,
}

impl Attempts {
    /// Nothing left to remember: the window has lapsed and no ban is running
    fn is_stale(&self, now: Instant, window: Duration) -> bool {
        self.banned_until.is_none_or(|until| now >= until)
            && now.duration_since(self.last_attempt) >= window
    }
}

/// Counts login attempts per key and bans keys that exceed the limit
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    entries: Arc<Mutex<HashMap<String, Attempts>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record an attempt for `key`. Returns false while the key is banned.
    pub async fn is_allowed(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_seconds);

        // Unknown keys are cheap to mint, so prune before tracking another one
        if !entries.contains_key(key) {
            entries.retain(|_, attempts| !attempts.is_stale(now, window));
        }

        let entry = entries.entry(key.to_string()).or_insert(Attempts {
            count: 0,
            last_attempt: now,
            banned_until: None,
        });

        if let Some(banned_until) = entry.banned_until {
            if now < banned_until {
                return false;
            }
            entry.count = 0;
            entry.banned_until = None;
        }

        if now.duration_since(entry.last_attempt) >= window {
            entry.count = 0;
        }

        if entry.count >= self.config.max_attempts {
            entry.banned_until = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            warn!(
                "Banned login for {} for {} seconds",
                key, self.config.ban_duration_seconds
            );
            return false;
        }

        entry.count += 1;
        entry.last_attempt = now;

        true
    }

    /// Forget every attempt recorded for `key`, e.g. after a successful login
    pub async fn reset(&self, key: &str) {
        if self.entries.lock().await.remove(key).is_some() {
            info!("Cleared login attempts for {}", key);
        }
    }

    /// Get the rate limiter configuration
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }
}
