//! In-memory rate limiting for access-code requests.
//!
//! DESIGN
//! ======
//! Sliding-window counters backed by `HashMap<String, VecDeque<Instant>>`,
//! keyed by normalized email. Two limits enforced:
//! - Per-email: 3 codes / 10 min
//! - Global: 60 codes / min
//!
//! State is per-process; a restart forgets the windows.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const DEFAULT_PER_EMAIL_LIMIT: usize = 3;
const DEFAULT_PER_EMAIL_WINDOW_SECS: u64 = 600;

const DEFAULT_GLOBAL_LIMIT: usize = 60;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RateLimitConfig {
    pub(crate) per_email_limit: usize,
    pub(crate) per_email_window: Duration,
    pub(crate) global_limit: usize,
    pub(crate) global_window: Duration,
}

impl RateLimitConfig {
    fn from_env() -> Self {
        Self {
            per_email_limit: env_parse("CODE_LIMIT_PER_EMAIL", DEFAULT_PER_EMAIL_LIMIT),
            per_email_window: Duration::from_secs(env_parse(
                "CODE_LIMIT_PER_EMAIL_WINDOW_SECS",
                DEFAULT_PER_EMAIL_WINDOW_SECS,
            )),
            global_limit: env_parse("CODE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: Duration::from_secs(env_parse("CODE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS)),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("too many codes requested for this email (max {limit}/{window_secs}s)")]
    PerEmailExceeded { limit: usize, window_secs: u64 },
    #[error("too many codes requested (max {limit}/{window_secs}s)")]
    GlobalExceeded { limit: usize, window_secs: u64 },
}

// =============================================================================
// RATE LIMITER
// =============================================================================

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<RateLimiterInner>>,
    config: RateLimitConfig,
}

#[derive(Default)]
struct RateLimiterInner {
    email_requests: HashMap<String, VecDeque<Instant>>,
    global_requests: VecDeque<Instant>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RateLimitConfig::from_env())
    }

    pub(crate) fn with_config(config: RateLimitConfig) -> Self {
        Self { inner: Arc::new(Mutex::new(RateLimiterInner::default())), config }
    }

    /// Check both per-email and global limits, then record the request.
    pub fn check_and_record(&self, email: &str) -> Result<(), RateLimitError> {
        self.check_and_record_at(email, Instant::now())
    }

    fn check_and_record_at(&self, email: &str, now: Instant) -> Result<(), RateLimitError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let cfg = self.config;

        prune_window(&mut inner.global_requests, now, cfg.global_window);
        if inner.global_requests.len() >= cfg.global_limit {
            return Err(RateLimitError::GlobalExceeded {
                limit: cfg.global_limit,
                window_secs: cfg.global_window.as_secs(),
            });
        }

        let email_deque = inner.email_requests.entry(email.to_owned()).or_default();
        prune_window(email_deque, now, cfg.per_email_window);
        if email_deque.len() >= cfg.per_email_limit {
            return Err(RateLimitError::PerEmailExceeded {
                limit: cfg.per_email_limit,
                window_secs: cfg.per_email_window.as_secs(),
            });
        }

        email_deque.push_back(now);
        inner.global_requests.push_back(now);

        // Drop emails whose windows have fully drained.
        let window = cfg.per_email_window;
        inner
            .email_requests
            .retain(|_, deque| deque.back().is_some_and(|&last| now.duration_since(last) <= window));

        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn prune_window(deque: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = deque.front() {
        if now.duration_since(front) > window {
            deque.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
