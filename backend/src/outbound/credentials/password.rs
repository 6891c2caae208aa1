//! Argon2id password hashing helpers.
//!
//! Stored hashes are PHC strings (`$argon2id$v=19$...`) carrying their own
//! salt and parameters.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};
use thiserror::Error;

/// Failures while producing or parsing a password hash.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordHashError {
    /// The stored value is not a PHC hash string.
    #[error("stored password hash is not a valid PHC string: {0}")]
    Unparseable(String),
    /// Hashing itself failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Hash `password` with Argon2id and a fresh random salt.
///
/// # Examples
/// ```
/// use cms::outbound::credentials::{hash_password, verify_password};
///
/// let hash = hash_password("secret")?;
/// assert!(hash.starts_with("$argon2id$"));
/// assert!(verify_password("secret", &hash)?);
/// # Ok::<(), cms::outbound::credentials::PasswordHashError>(())
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| PasswordHashError::Hashing(error.to_string()))
}

/// Check `password` against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; only an unparseable hash is an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|error| PasswordHashError::Unparseable(error.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
