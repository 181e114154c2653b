use async_trait::async_trait;
use hrdesk_common::{AccountId, LoginResponse, TokenResponse};

use crate::error::AppError;

/// The authentication workflow behind the HTTP handlers.
///
/// `login` verifies credentials and issues a one-time code; `redeem` turns a
/// correct code into a session token; `register` creates an account and
/// signs it straight in.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: String,
    ) -> Result<TokenResponse, AppError>;

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError>;

    async fn redeem(&self, account_id: AccountId, code: &str) -> Result<TokenResponse, AppError>;

    async fn validate_session(&self, token: &str) -> bool;
}
