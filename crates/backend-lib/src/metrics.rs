// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const OTP_ISSUED: &str = "otp.issued";
pub const OTP_REDEEMED: &str = "otp.redeemed";
pub const OTP_EXPIRED: &str = "otp.expired";
pub const OTP_MISMATCH: &str = "otp.mismatch";
pub const OTP_PENDING: &str = "otp.pending";
pub const SESSION_CREATED: &str = "session.created";
pub const SESSION_EXPIRED: &str = "session.expired";
pub const SESSION_ACTIVE: &str = "session.active";
pub const LOGIN_REJECTED: &str = "login.rejected";
pub const ACCOUNT_REGISTERED: &str = "account.registered";
