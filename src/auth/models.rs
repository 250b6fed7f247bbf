//! Authentication data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account identifier type
pub type UserId = Uuid;

/// Owned resource (post) identifier type
pub type PostId = Uuid;

/// Public user fields, safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full user row including the stored credential hash.
///
/// Never serialized; the hash stays inside the core.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Strip the credential hash, leaving only client-visible fields.
    pub fn into_public(self) -> User {
        User {
            id: self.id,
            email: self.email,
            is_premium: self.is_premium,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Token pair returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT claims for access tokens.
///
/// Explicit typed record; claims are never built from dynamic maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Issuer tag distinguishing this system's access tokens
    pub iss: String,
    /// Subject: the account the token asserts
    pub sub: UserId,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Persisted refresh token row
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    /// A token is live while it is unrevoked and strictly before its expiry.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}
