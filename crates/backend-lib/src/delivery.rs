// ============================
// crates/backend-lib/src/delivery.rs
// ============================
//! Out-of-band delivery of one-time codes.
//!
//! The core only generates and validates codes; how a code reaches the user
//! (console, email, SMS) is a collaborator behind this trait.
use async_trait::async_trait;

use crate::accounts::Account;
use crate::auth::otp::OtpChallenge;
use crate::error::AppError;

/// Trait for code delivery channels
#[async_trait]
pub trait CodeDelivery: Send + Sync {
    async fn deliver(&self, account: &Account, challenge: &OtpChallenge) -> Result<(), AppError>;
}

/// Delivery channel that writes the code to the server log.
///
/// Development only: anyone who can read the log can log in.
pub struct ConsoleDelivery;

#[async_trait]
impl CodeDelivery for ConsoleDelivery {
    async fn deliver(&self, account: &Account, challenge: &OtpChallenge) -> Result<(), AppError> {
        tracing::info!(
            username = %account.username,
            email = %account.email,
            code = %challenge.code(),
            expires_in_secs = challenge.ttl_remaining().as_secs(),
            "one-time code issued"
        );
        Ok(())
    }
}
