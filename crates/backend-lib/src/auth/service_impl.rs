use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use metrics::counter;

use hrdesk_common::{AccountId, AccountSummary, LoginResponse, TokenResponse};

use crate::accounts::{Account, AccountStore};
use crate::auth::otp::OtpChallengeManager;
use crate::auth::password::{hash_password_secure, validate_password_strength};
use crate::auth::rate_limit::AuthRateLimiter;
use crate::auth::session::SessionManager;
use crate::auth::verifier::CredentialVerifier;
use crate::auth::AuthService;
use crate::config::Settings;
use crate::delivery::CodeDelivery;
use crate::error::AppError;
use crate::metrics as keys;
use crate::validation;

/// Default `AuthService` wiring the verifier, challenge manager, session
/// manager and delivery channel together.
pub struct DefaultAuth {
    store: Arc<dyn AccountStore>,
    verifier: CredentialVerifier,
    otp: OtpChallengeManager,
    sessions: SessionManager,
    delivery: Arc<dyn CodeDelivery>,
    limiter: AuthRateLimiter,
    settings: Settings,
}

impl DefaultAuth {
    pub fn new(
        store: Arc<dyn AccountStore>,
        delivery: Arc<dyn CodeDelivery>,
        settings: Settings,
    ) -> Self {
        let verifier = CredentialVerifier::new(store.clone());
        let otp = OtpChallengeManager::new(
            settings.otp.digits,
            Duration::from_secs(settings.otp.ttl_secs),
        );
        let sessions = SessionManager::new(Duration::from_secs(settings.session_ttl_secs));
        let limiter = AuthRateLimiter::new(
            settings.rate_limit.max_attempts,
            Duration::from_secs(settings.rate_limit.lockout_secs),
        );

        Self {
            store,
            verifier,
            otp,
            sessions,
            delivery,
            limiter,
            settings,
        }
    }

    fn summary(account: &Account) -> AccountSummary {
        AccountSummary {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
        }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn register(
        &self,
        username: &str,
        email: &str,
        mut password: String,
    ) -> Result<TokenResponse, AppError> {
        validation::validate_username(username)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validation::validate_email(email).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        validation::validate_password(&password)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let requirements = &self.settings.password_requirements;
        if !validate_password_strength(&password, requirements) {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {} characters and meet the complexity requirements",
                requirements.min_length
            )));
        }

        let password_hash =
            hash_password_secure(&mut password).map_err(|e| AppError::Internal(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            username: username.to_string(),
            email: email.to_lowercase(),
            password_hash,
            created_at: Utc::now(),
        };
        let summary = Self::summary(&account);
        self.store.insert(account).await?;

        counter!(keys::ACCOUNT_REGISTERED).increment(1);
        tracing::info!(email = %summary.email, "account registered");

        // The intake flow signs a fresh registration straight in
        let token = self.sessions.new_session(summary.id).await;
        Ok(TokenResponse {
            token,
            account: summary,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        if !self.limiter.check_rate_limit(email) {
            return Err(AppError::AuthRateLimited);
        }

        let account = match self.verifier.verify(email, password).await {
            Ok(account) => account,
            Err(AppError::InvalidCredentials) => {
                self.limiter.record_failed_attempt(email);
                counter!(keys::LOGIN_REJECTED).increment(1);
                return Err(AppError::InvalidCredentials);
            },
            Err(other) => return Err(other),
        };
        self.limiter.record_success(email);

        // Credentials check out; gate the session behind a one-time code
        let challenge = self.otp.issue(account.id);
        self.delivery.deliver(&account, &challenge).await?;

        Ok(LoginResponse {
            account_id: account.id,
            challenge_required: true,
        })
    }

    async fn redeem(&self, account_id: AccountId, code: &str) -> Result<TokenResponse, AppError> {
        // No input validation here: a malformed code is just a code that
        // cannot match, and reports as CodeMismatch like any other wrong
        // guess. The redeem error set stays closed.
        let key = account_id.to_string();
        if !self.limiter.check_rate_limit(&key) {
            return Err(AppError::AuthRateLimited);
        }

        match self.otp.redeem(account_id, code) {
            Ok(()) => {},
            Err(err) => {
                if matches!(err, AppError::CodeMismatch) {
                    self.limiter.record_failed_attempt(&key);
                }
                return Err(err);
            },
        }
        self.limiter.record_success(&key);

        // The challenge was bound to a verified account at issue time, so a
        // missing account here is a store inconsistency, not bad input.
        let account = self
            .store
            .load(account_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("account {account_id} vanished")))?;

        let token = self.sessions.new_session(account.id).await;
        Ok(TokenResponse {
            token,
            account: Self::summary(&account),
        })
    }

    async fn validate_session(&self, token: &str) -> bool {
        self.sessions.validate_session(token).await
    }
}
