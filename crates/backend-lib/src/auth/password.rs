// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use scrypt::{password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng}, Scrypt};
use zeroize::Zeroize;

use crate::config::PasswordRequirements;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// Hash a password using scrypt
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password(plain.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored hash.
///
/// An unparsable hash verifies as false, the same as a wrong password.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}

/// Check if a password meets the complexity requirements
pub fn validate_password_strength(password: &str, requirements: &PasswordRequirements) -> bool {
    if password.len() < requirements.min_length {
        return false;
    }

    if requirements.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
        return false;
    }

    if requirements.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
        return false;
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    if requirements.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        return false;
    }

    true
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String) -> anyhow::Result<String> {
    let hash = hash_password(plain)?;
    plain.zeroize();
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_password("Sup3r-secret!!").unwrap();
        assert!(verify_password(&hash, "Sup3r-secret!!"));
        assert!(!verify_password(&hash, "wrong-password"));
        assert!(!verify_password("not a phc hash", "Sup3r-secret!!"));
    }

    #[test]
    fn strength_rules() {
        let req = PasswordRequirements::default();
        assert!(validate_password_strength("Abcdefgh1!", &req));
        assert!(!validate_password_strength("short1!A", &req));
        assert!(!validate_password_strength("abcdefgh1!", &req)); // no uppercase
        assert!(!validate_password_strength("ABCDEFGH1!", &req)); // no lowercase
        assert!(!validate_password_strength("Abcdefghi!", &req)); // no digit
        assert!(!validate_password_strength("Abcdefgh12", &req)); // no special
    }

    #[test]
    fn secure_hash_wipes_plaintext() {
        let mut plain = "Sup3r-secret!!".to_string();
        let hash = hash_password_secure(&mut plain).unwrap();
        assert!(plain.is_empty());
        assert!(verify_password(&hash, "Sup3r-secret!!"));
    }
}
