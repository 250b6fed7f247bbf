//! Password hashing and verification.
//!
//! Argon2id with per-hash random salts and the default parameter set. The PHC
//! output string carries algorithm and parameters, so verification stays
//! self-describing and parameters can be raised later without breaking stored
//! hashes. Plaintext passwords are never logged from this module.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::errors::{AuthError, AuthResult};

/// Hash a plaintext password with Argon2id
///
/// # Arguments
///
/// * `password` - Plaintext password, must be non-empty
///
/// # Returns
///
/// * `AuthResult<String>` - PHC-format hash string
///
/// # Errors
///
/// * `AuthError::EmptyPassword` - Empty plaintext
/// * `AuthError::HashingFailed` - Argon2 failure
pub fn hash_password(password: &str) -> AuthResult<String> {
    if password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("argon2 hashing failed: {e}");
            AuthError::HashingFailed
        })
}

/// Verify a plaintext password against a stored hash
///
/// A legitimate mismatch is `Ok(false)`, never an error; errors are reserved
/// for malformed or corrupt stored hashes. Verification runs in time
/// independent of where the mismatch occurs.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        log::error!("stored password hash is malformed: {e}");
        AuthError::HashingFailed
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            log::error!("argon2 verification failed: {e}");
            Err(AuthError::HashingFailed)
        }
    }
}
