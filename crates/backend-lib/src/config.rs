// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use anyhow::Result;

use crate::auth::otp::{DEFAULT_OTP_DIGITS, DEFAULT_OTP_TTL};
use crate::auth::password::MIN_PASSWORD_LENGTH;
use crate::auth::session::SESSION_TTL;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path (account store root)
    pub data_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Session TTL in seconds
    pub session_ttl_secs: u64,
    /// One-time code settings
    pub otp: OtpSettings,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
    /// Failed-attempt lockout settings
    pub rate_limit: RateLimitSettings,
}

/// One-time code settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpSettings {
    /// Code width in digits. 4 gives the 1000-9999 space; 6 gives
    /// 100000-999999 for stronger codes. No leading zeros either way.
    pub digits: u32,
    /// Challenge TTL in seconds
    pub ttl_secs: u64,
}

/// Password complexity requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequirements {
    /// Minimum password length
    pub min_length: usize,
    /// Require uppercase letters
    pub require_uppercase: bool,
    /// Require lowercase letters
    pub require_lowercase: bool,
    /// Require digits
    pub require_digit: bool,
    /// Require special characters
    pub require_special: bool,
}

/// Failed-attempt lockout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Failed attempts before lockout
    pub max_attempts: u32,
    /// Lockout duration in seconds
    pub lockout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            session_ttl_secs: SESSION_TTL.as_secs(),
            otp: OtpSettings::default(),
            password_requirements: PasswordRequirements::default(),
            rate_limit: RateLimitSettings::default(),
        }
    }
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            digits: DEFAULT_OTP_DIGITS,
            ttl_secs: DEFAULT_OTP_TTL.as_secs(),
        }
    }
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            lockout_secs: 5 * 60,
        }
    }
}

impl Settings {
    /// Load settings from the given TOML file and `HRDESK_`-prefixed
    /// environment variables, on top of the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("HRDESK_").split("__"))
            .extract()?;

        Ok(settings)
    }
}
