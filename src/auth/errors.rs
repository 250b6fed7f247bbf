//! Authentication and authorization error types.

use thiserror::Error;

/// Errors produced by the auth core.
///
/// The HTTP layer maps these to status codes: `EmptyPassword` and
/// `MalformedAuthHeader` to 400, the credential/token failures to 401,
/// `Forbidden` to 403, `NotFound` to 404, and the internal failures
/// (`Database`, `HashingFailed`, `TokenGeneration`) to 500.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or hash parsing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Token signing or random generation failed
    #[error("Token generation failed")]
    TokenGeneration,

    /// Empty plaintext password
    #[error("Password must not be empty")]
    EmptyPassword,

    /// Authorization header absent or empty
    #[error("Missing authorization header")]
    MissingAuthHeader,

    /// Authorization header present but not in the expected shape
    #[error("Malformed authorization header")]
    MalformedAuthHeader,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Access token rejected; covers signature, expiry, issuer, and subject
    /// failures so clients cannot probe which check failed
    #[error("Invalid token")]
    InvalidToken,

    /// Refresh token unknown, expired, or revoked
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Webhook API key mismatch
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Account, resource, or token not found
    #[error("Not found")]
    NotFound,

    /// Authenticated caller does not own the target resource
    #[error("Forbidden")]
    Forbidden,
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and crypto failures are sanitized so nothing about the internal
    /// system structure reaches the client.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) => "Internal server error".to_string(),
            AuthError::HashingFailed | AuthError::TokenGeneration => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;
