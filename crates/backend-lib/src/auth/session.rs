// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session token handling and management.
use hrdesk_common::AccountId;
use tokio::sync::RwLock;
use std::{collections::HashMap, sync::Arc, time::{Duration, SystemTime}};
use metrics::{counter, gauge};

use crate::auth::token::generate_secure_token;
use crate::metrics as keys;

/// Session TTL (time to live)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7); // 7 days

/// Session information
#[derive(Clone)]
pub struct Session {
    pub account_id: AccountId,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

/// Session manager for handling authentication tokens
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a new session manager and spawn the cleanup task
    pub fn new(ttl: Duration) -> Self {
        let manager = SessionManager {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        let manager_clone = manager.clone();
        tokio::spawn(async move {
            manager_clone.cleanup_task().await;
        });

        manager
    }

    /// Mint a session token for a verified account.
    ///
    /// Only called after registration or a successful code redemption; the
    /// `AccountId` is the authorization, credentials are never re-checked.
    pub async fn new_session(&self, account_id: AccountId) -> String {
        let token = generate_secure_token();
        let now = SystemTime::now();
        let session = Session {
            account_id,
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);

        counter!(keys::SESSION_CREATED).increment(1);
        gauge!(keys::SESSION_ACTIVE).set(sessions.len() as f64);

        token
    }

    /// Get a session by token
    pub async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Validate a session token
    pub async fn validate_session(&self, token: &str) -> bool {
        let sessions = self.sessions.read().await;
        if let Some(session) = sessions.get(token) {
            let now = SystemTime::now();
            if now < session.expires_at {
                return true;
            }
        }
        false
    }

    /// Cleanup task that runs periodically to remove expired sessions
    async fn cleanup_task(&self) {
        let cleanup_interval = Duration::from_secs(60 * 60); // 1 hour

        loop {
            tokio::time::sleep(cleanup_interval).await;

            let mut sessions = self.sessions.write().await;
            let now = SystemTime::now();
            let before_count = sessions.len();

            sessions.retain(|_, session| now < session.expires_at);

            let after_count = sessions.len();
            let removed = before_count - after_count;

            if removed > 0 {
                counter!(keys::SESSION_EXPIRED).increment(removed as u64);
                gauge!(keys::SESSION_ACTIVE).set(after_count as f64);
            }
        }
    }
}
