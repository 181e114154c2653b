// ================
// crates/common/src/lib.rs
// ================
//! Common types shared between the `hrdesk` backend and its clients.
//! This module defines the authentication API request/response bodies and
//! supporting types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to a verified account.
///
/// Returned by the credential verifier and consumed by the token layer;
/// it never exposes credentials.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AccountId(pub Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Public view of an account, safe to return to clients.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub email: String,
}

/// Body for `POST /api/auth/register`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body for `POST /api/auth/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful login: credentials were accepted and a one-time
/// code is on its way out-of-band. No token yet.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub account_id: AccountId,
    pub challenge_required: bool,
}

/// Body for `POST /api/auth/verify-otp`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VerifyOtpRequest {
    pub account_id: AccountId,
    pub code: String,
}

/// Response carrying a freshly minted session token.
///
/// Returned by registration (the intake flow signs the user straight in) and
/// by a successful code redemption.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
    pub account: AccountSummary,
}
