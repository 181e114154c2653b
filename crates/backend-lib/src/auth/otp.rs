// ============================
// crates/backend-lib/src/auth/otp.rs
// ============================
//! One-time code challenge lifecycle.
//!
//! At most one live challenge exists per account; issuing again supersedes
//! the previous one. Redemption is destructive: a code can be redeemed at
//! most once. A wrong code leaves the challenge in place so the user can
//! retry until the TTL runs out; guessing within that window is bounded by
//! the rate limiter at the handler edge, not here.
use dashmap::{mapref::entry::Entry, DashMap};
use hrdesk_common::AccountId;
use metrics::{counter, gauge};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::AppError;
use crate::metrics as keys;

/// Default challenge TTL
pub const DEFAULT_OTP_TTL: Duration = Duration::from_secs(5 * 60);

/// Default code width. Four digits means the 1000-9999 space; the leading
/// digit is never zero, so codes compare as fixed-width strings.
pub const DEFAULT_OTP_DIGITS: u32 = 4;

/// A pending one-time code challenge
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    code: String,
    expires_at: Instant,
}

impl OtpChallenge {
    /// The code, for out-of-band delivery only
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Time remaining before the challenge expires
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// In-memory challenge store keyed by account.
///
/// Challenges do not survive a restart; a client that loses its challenge
/// simply logs in again. Per-account operations are linearizable: the map
/// entry lock is held across every check-and-remove, so a redeem can never
/// interleave with a concurrent re-issue for the same account. Different
/// accounts never contend beyond shard granularity.
#[derive(Clone)]
pub struct OtpChallengeManager {
    challenges: Arc<DashMap<AccountId, OtpChallenge>>,
    digits: u32,
    ttl: Duration,
}

impl OtpChallengeManager {
    /// Create a manager and spawn the background sweep task.
    ///
    /// Expiry is also checked lazily on redeem; the sweep (every TTL/2)
    /// exists to bound memory when nobody comes back to redeem.
    pub fn new(digits: u32, ttl: Duration) -> Self {
        let manager = Self::without_sweeper(digits, ttl);

        let manager_clone = manager.clone();
        tokio::spawn(async move {
            manager_clone.sweep_task().await;
        });

        manager
    }

    /// Create a manager with no background sweep, for callers that drive
    /// `sweep()` themselves.
    pub fn without_sweeper(digits: u32, ttl: Duration) -> Self {
        Self {
            challenges: Arc::new(DashMap::new()),
            digits,
            ttl,
        }
    }

    /// Issue a new challenge for an account, invalidating any pending one.
    ///
    /// The returned challenge carries the code for out-of-band delivery.
    pub fn issue(&self, account_id: AccountId) -> OtpChallenge {
        let code = self.generate_code();
        let challenge = OtpChallenge {
            code,
            expires_at: Instant::now() + self.ttl,
        };

        // insert replaces: a fresh login supersedes any outstanding code
        self.challenges.insert(account_id, challenge.clone());

        counter!(keys::OTP_ISSUED).increment(1);
        gauge!(keys::OTP_PENDING).set(self.challenges.len() as f64);

        challenge
    }

    /// Redeem a pending challenge.
    ///
    /// Exactly one of four outcomes, decided under the entry lock:
    /// no pending challenge, expired (entry reclaimed), wrong code (entry
    /// kept for retry), or match (entry consumed).
    pub fn redeem(&self, account_id: AccountId, submitted: &str) -> Result<(), AppError> {
        let outcome = match self.challenges.entry(account_id) {
            Entry::Vacant(_) => Err(AppError::NoChallenge),
            Entry::Occupied(entry) => {
                if Instant::now() >= entry.get().expires_at {
                    entry.remove();
                    counter!(keys::OTP_EXPIRED).increment(1);
                    Err(AppError::OtpExpired)
                } else if entry.get().code != submitted {
                    counter!(keys::OTP_MISMATCH).increment(1);
                    Err(AppError::CodeMismatch)
                } else {
                    entry.remove();
                    counter!(keys::OTP_REDEEMED).increment(1);
                    Ok(())
                }
            },
        };

        gauge!(keys::OTP_PENDING).set(self.challenges.len() as f64);
        outcome
    }

    /// Whether an account currently has a pending challenge
    pub fn has_challenge(&self, account_id: AccountId) -> bool {
        self.challenges.contains_key(&account_id)
    }

    /// Drop every expired challenge. Returns the number reclaimed.
    ///
    /// Removals are counted inside the retain predicate; issues running
    /// concurrently on other shards must not skew the count.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let removed = AtomicUsize::new(0);

        self.challenges.retain(|_, challenge| {
            if now < challenge.expires_at {
                true
            } else {
                removed.fetch_add(1, Ordering::Relaxed);
                false
            }
        });

        let removed = removed.into_inner();
        if removed > 0 {
            counter!(keys::OTP_EXPIRED).increment(removed as u64);
            gauge!(keys::OTP_PENDING).set(self.challenges.len() as f64);
        }
        removed
    }

    async fn sweep_task(&self) {
        let interval = (self.ttl / 2).max(Duration::from_secs(1));

        loop {
            tokio::time::sleep(interval).await;
            let removed = self.sweep();
            if removed > 0 {
                tracing::debug!(removed, "swept expired one-time codes");
            }
        }
    }

    fn generate_code(&self) -> String {
        let lo = 10u32.pow(self.digits - 1);
        let hi = 10u32.pow(self.digits);
        let mut rng = rand::thread_rng();
        rng.gen_range(lo..hi).to_string()
    }
}
