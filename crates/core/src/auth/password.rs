//! Argon2id password hashing.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Nothing to hash.
    #[error("password must not be empty")]
    Empty,

    /// Argon2 rejected the input or parameters.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// Stored hash is not a PHC string.
    #[error("stored password hash is malformed")]
    MalformedHash,

    /// Verification failed for a reason other than a mismatch.
    #[error("failed to verify password: {0}")]
    Verify(String),
}

/// Hashes a password with Argon2id and a random salt.
///
/// Returns a PHC string (`$argon2id$v=19$...`).
///
/// # Errors
///
/// `Empty` for an empty password, `Hash` if Argon2 fails.
///
/// ```
/// use bookwise_core::auth::hash_password;
///
/// let hash = hash_password("Admin!23456").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks a password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`, not an error.
///
/// # Errors
///
/// `MalformedHash` when `hash` cannot be parsed, `Verify` for other failures.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::MalformedHash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("Admin!23456").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Admin!23456", &hash).unwrap());
        assert!(!verify_password("admin!23456", &hash).unwrap());
    }

    #[test]
    fn test_salt_makes_hashes_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(hash_password(""), Err(PasswordError::Empty)));
    }

    #[test]
    fn test_malformed_hash() {
        assert!(matches!(
            verify_password("pw", "not-a-phc-string"),
            Err(PasswordError::MalformedHash)
        ));
    }
}
