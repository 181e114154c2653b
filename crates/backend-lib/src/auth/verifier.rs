// ============================
// crates/backend-lib/src/auth/verifier.rs
// ============================
//! Credential verification against the account store.
use std::sync::Arc;

use crate::accounts::{Account, AccountStore};
use crate::auth::password::verify_password;
use crate::error::AppError;

/// Verifies a submitted identifier + secret against stored credentials.
///
/// Read-only: never issues tokens, never mutates the store.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn AccountStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Verify credentials, returning the account on success.
    ///
    /// An unknown identifier and a wrong secret both fail with
    /// `InvalidCredentials`; callers cannot tell the two apart, so the API
    /// cannot be used to enumerate accounts. Store unavailability surfaces
    /// separately as `TransientStore`.
    pub async fn verify(&self, identifier: &str, secret: &str) -> Result<Account, AppError> {
        let account = self
            .store
            .find_by_email(identifier)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&account.password_hash, secret) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }
}
