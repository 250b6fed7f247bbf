//! Access token codec and refresh token generation.
//!
//! Access tokens are signed HS256 JWTs carrying a fixed issuer tag, so a token
//! minted for another purpose with the same secret can never authenticate here.
//! Validation failures all collapse into the single opaque
//! [`AuthError::InvalidToken`]; the specific cause is only ever logged at debug
//! level, never returned to a client.
//!
//! Refresh tokens are opaque: 32 bytes from the OS CSPRNG, hex-encoded. They
//! carry no structure and no time-derived component.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::{TryRngCore, rngs::OsRng};

use super::errors::{AuthError, AuthResult};
use super::models::{AccessTokenClaims, UserId};

/// Issuer tag stamped into every access token this system signs
pub const ACCESS_TOKEN_ISSUER: &str = "quill-access";

/// Raw length of a refresh token before hex encoding (256 bits)
const REFRESH_TOKEN_BYTES: usize = 32;

/// Issue a signed access token for `user_id`
///
/// # Arguments
///
/// * `user_id` - Subject identity
/// * `secret` - Symmetric signing secret
/// * `ttl` - Token lifetime from now
///
/// # Errors
///
/// * `AuthError::TokenGeneration` - Signing failed
pub fn issue_access_token(user_id: UserId, secret: &str, ttl: Duration) -> AuthResult<String> {
    let now = Utc::now();
    let claims = AccessTokenClaims {
        iss: ACCESS_TOKEN_ISSUER.to_string(),
        sub: user_id,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        log::error!("access token signing failed: {e}");
        AuthError::TokenGeneration
    })
}

/// Validate an access token and return the subject identity
///
/// Checks, in order: signature, expiry (zero leeway), issuer tag, and that the
/// subject parses as an identity. Every failure returns the same opaque error.
pub fn validate_access_token(token: &str, secret: &str) -> AuthResult<UserId> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);

    let data = decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        // Internal logs may name the cause; the client never sees it.
        log::debug!("access token rejected: {e}");
        AuthError::InvalidToken
    })?;

    // The library accepts a token presented at exactly its expiry second;
    // this core rejects at or after expiry.
    if data.claims.exp <= Utc::now().timestamp() {
        log::debug!("access token rejected: at or past expiry");
        return Err(AuthError::InvalidToken);
    }

    Ok(data.claims.sub)
}

/// Generate an opaque refresh token from the OS CSPRNG
///
/// Returns a fixed-length printable string (64 hex characters, 256 bits of
/// entropy) with no sequential or time-derived component.
pub fn generate_refresh_token() -> AuthResult<String> {
    let mut key = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut key).map_err(|e| {
        log::error!("system rng unavailable: {e}");
        AuthError::TokenGeneration
    })?;
    Ok(hex::encode(key))
}
