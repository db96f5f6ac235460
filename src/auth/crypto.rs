//! # Cryptographic Utilities
//!
//! Password hashing, email validation and secret generation.
//!
//! Passwords are only ever stored as Argon2id hashes.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;
use regex::Regex;

use super::errors::{AuthError, AuthResult};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Check an email address against the accepted shape
pub fn validate_email(email: &str) -> AuthResult<()> {
    if email_regex().is_some_and(|re| re.is_match(email)) {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail)
    }
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Verify a password against its hash
///
/// Uses constant-time comparison internally (via argon2 crate).
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::HashingFailed)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a random 256-bit secret, base64 encoded
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = "secure_password_123";
        let hash = hash_password(password).unwrap();

        // Hash should be different from password
        assert_ne!(hash, password);

        // Verification should succeed
        assert!(verify_password(password, &hash).unwrap());

        // Wrong password should fail
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_password_hash_produces_unique_hashes() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_corrupt_hash() {
        assert_eq!(verify_password("pw", "not-a-hash"), Err(AuthError::HashingFailed));
    }

    #[test]
    fn test_email_validation() {
        assert!(validate_email("s1234567@student.rmit.edu.au").is_ok());
        assert!(validate_email("first.last+tag@example.com").is_ok());

        assert_eq!(validate_email("no-at-sign.com"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("user@nodot"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email("user name@example.com"), Err(AuthError::InvalidEmail));
        assert_eq!(validate_email(""), Err(AuthError::InvalidEmail));
    }

    #[test]
    fn test_secret_generation() {
        let a = generate_secret();
        let b = generate_secret();
        assert_ne!(a, b);
        assert!(a.len() >= 32);
    }
}
