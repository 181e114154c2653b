// ============================
// crates/backend-lib/src/auth/rate_limit.rs
// ============================
//! Rate limiting for authentication attempts.
//!
//! Keyed by account identifier. This is the only brake on guessing a
//! one-time code within its TTL window; the challenge manager itself never
//! locks anyone out.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default number of failed attempts before rate limiting
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default lockout duration (5 minutes)
const DEFAULT_LOCKOUT_DURATION: Duration = Duration::from_secs(5 * 60);

/// Entry in the rate limit map
#[derive(Debug, Clone)]
struct RateLimitEntry {
    /// Number of failed attempts
    failed_attempts: u32,
    /// Time of the last failed attempt
    last_failure: Instant,
    /// When the lockout expires, if locked out
    lockout_expiry: Option<Instant>,
}

/// Rate limiter for authentication attempts
#[derive(Debug, Clone)]
pub struct AuthRateLimiter {
    /// Map of account identifiers to rate limit entries
    attempts: Arc<DashMap<String, RateLimitEntry>>,
    /// Maximum number of failed attempts before lockout
    max_attempts: u32,
    /// Duration of lockout period
    lockout_duration: Duration,
}

impl Default for AuthRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_LOCKOUT_DURATION)
    }
}

impl AuthRateLimiter {
    /// Create a new auth rate limiter
    pub fn new(max_attempts: u32, lockout_duration: Duration) -> Self {
        Self {
            attempts: Arc::new(DashMap::new()),
            max_attempts,
            lockout_duration,
        }
    }

    /// Record a failed authentication attempt
    pub fn record_failed_attempt(&self, identifier: &str) {
        let now = Instant::now();

        let mut entry = self
            .attempts
            .entry(identifier.to_string())
            .or_insert_with(|| RateLimitEntry {
                failed_attempts: 0,
                last_failure: now,
                lockout_expiry: None,
            });

        // An expired lockout resets the count
        if let Some(expiry) = entry.lockout_expiry {
            if now > expiry {
                entry.failed_attempts = 0;
                entry.lockout_expiry = None;
            }
        }

        entry.failed_attempts += 1;
        entry.last_failure = now;

        if entry.failed_attempts >= self.max_attempts {
            entry.lockout_expiry = Some(now + self.lockout_duration);
            tracing::warn!(identifier, "account locked out after repeated failed attempts");
        }
    }

    /// Record a successful authentication
    pub fn record_success(&self, identifier: &str) {
        // On successful auth, remove the entry
        self.attempts.remove(identifier);
    }

    /// Check if an identifier is allowed to attempt authentication
    pub fn check_rate_limit(&self, identifier: &str) -> bool {
        if let Some(entry) = self.attempts.get(identifier) {
            if let Some(expiry) = entry.lockout_expiry {
                if Instant::now() < expiry {
                    return false;
                }
            }
        }

        true
    }

    /// Clean up expired lockouts and stale entries
    pub fn cleanup(&self) {
        let now = Instant::now();

        self.attempts.retain(|_, entry| {
            if let Some(expiry) = entry.lockout_expiry {
                return now < expiry;
            }

            // Keep non-locked entries for a day
            now.duration_since(entry.last_failure) < Duration::from_secs(24 * 60 * 60)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockout_after_max_attempts() {
        let limiter = AuthRateLimiter::new(3, Duration::from_secs(60));

        assert!(limiter.check_rate_limit("u1@example.com"));
        for _ in 0..3 {
            limiter.record_failed_attempt("u1@example.com");
        }
        assert!(!limiter.check_rate_limit("u1@example.com"));

        // A different identifier is unaffected
        assert!(limiter.check_rate_limit("u2@example.com"));
    }

    #[test]
    fn success_clears_the_slate() {
        let limiter = AuthRateLimiter::new(3, Duration::from_secs(60));

        limiter.record_failed_attempt("u1@example.com");
        limiter.record_failed_attempt("u1@example.com");
        limiter.record_success("u1@example.com");

        for _ in 0..2 {
            limiter.record_failed_attempt("u1@example.com");
        }
        assert!(limiter.check_rate_limit("u1@example.com"));
    }

    #[test]
    fn lockout_expires() {
        let limiter = AuthRateLimiter::new(1, Duration::from_millis(10));

        limiter.record_failed_attempt("u1@example.com");
        assert!(!limiter.check_rate_limit("u1@example.com"));

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check_rate_limit("u1@example.com"));
    }

    #[test]
    fn cleanup_drops_expired_lockouts() {
        let limiter = AuthRateLimiter::new(1, Duration::from_millis(10));
        limiter.record_failed_attempt("u1@example.com");

        std::thread::sleep(Duration::from_millis(30));
        limiter.cleanup();
        assert!(limiter.attempts.is_empty());
    }
}
