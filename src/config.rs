//! Auth configuration module.
//!
//! Holds the process-wide signing secret, the webhook API key, and the token
//! lifetimes. The configuration is built once at startup and handed by value to
//! [`SessionManager`](crate::auth::SessionManager) and
//! [`OwnershipGuard`](crate::auth::OwnershipGuard); nothing in this crate reads
//! the environment after construction.

use chrono::Duration;
use std::env;
use std::fmt;

/// Default access token lifetime (1 hour)
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// Default refresh token lifetime (60 days)
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 60;

/// Auth core configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric secret for signing access tokens
    pub jwt_secret: String,

    /// Shared secret for the server-to-server webhook caller
    pub api_key: String,

    /// Access token lifetime
    pub access_token_ttl: Duration,

    /// Refresh token lifetime, fixed at issuance and never extended
    pub refresh_token_ttl: Duration,
}

impl AuthConfig {
    /// Create a configuration with the default token lifetimes
    /// (1-hour access tokens, 60-day refresh tokens).
    pub fn new(jwt_secret: String, api_key: String) -> Self {
        Self {
            jwt_secret,
            api_key,
            access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS),
            refresh_token_ttl: Duration::days(DEFAULT_REFRESH_TOKEN_TTL_DAYS),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `JWT_SECRET`: symmetric signing secret for access tokens
    /// - `API_KEY`: shared secret for the webhook caller
    /// - `ACCESS_TOKEN_TTL_SECS`: access token lifetime in seconds (default: 3600)
    /// - `REFRESH_TOKEN_TTL_DAYS`: refresh token lifetime in days (default: 60)
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` or `API_KEY` is not set, or if a TTL override is
    /// not a valid integer.
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            api_key: env::var("API_KEY").expect("API_KEY must be set"),
            access_token_ttl: Duration::seconds(
                env::var("ACCESS_TOKEN_TTL_SECS")
                    .unwrap_or_else(|_| DEFAULT_ACCESS_TOKEN_TTL_SECS.to_string())
                    .parse()
                    .expect("ACCESS_TOKEN_TTL_SECS must be a valid i64"),
            ),
            refresh_token_ttl: Duration::days(
                env::var("REFRESH_TOKEN_TTL_DAYS")
                    .unwrap_or_else(|_| DEFAULT_REFRESH_TOKEN_TTL_DAYS.to_string())
                    .parse()
                    .expect("REFRESH_TOKEN_TTL_DAYS must be a valid i64"),
            ),
        }
    }
}

// Secrets must never reach logs, so Debug redacts them.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = AuthConfig::new("secret".to_string(), "key".to_string());
        assert_eq!(config.access_token_ttl, Duration::hours(1));
        assert_eq!(config.refresh_token_ttl, Duration::days(60));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::new("supersecret".to_string(), "topkey".to_string());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("supersecret"));
        assert!(!rendered.contains("topkey"));
        assert!(rendered.contains("<redacted>"));
    }
}
