// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod otp;
pub mod session;
pub mod token;
pub mod verifier;
pub mod rate_limit;
mod service;
mod service_impl;

pub use password::{hash_password, verify_password, validate_password_strength, MIN_PASSWORD_LENGTH};
pub use otp::{OtpChallenge, OtpChallengeManager, DEFAULT_OTP_DIGITS, DEFAULT_OTP_TTL};
pub use session::{Session, SessionManager, SESSION_TTL};
pub use token::generate_secure_token;
pub use verifier::CredentialVerifier;
pub use rate_limit::AuthRateLimiter;
pub use service::AuthService;
pub use service_impl::DefaultAuth;
