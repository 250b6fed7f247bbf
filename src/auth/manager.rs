//! Session manager orchestrating login, refresh, revocation, and credential updates.

use std::sync::Arc;

use chrono::Utc;

use super::errors::{AuthError, AuthResult};
use super::models::{SessionTokens, User, UserId};
use super::{hashing, headers, tokens};
use crate::config::AuthConfig;
use crate::db::repository::{RefreshTokenStore, UserStore};

/// Session manager
///
/// Stateless apart from its immutable configuration; safe to share across
/// concurrent requests. Every store interaction is a single self-contained
/// call, so there is no partial state to roll back on cancellation.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    config: AuthConfig,
}

impl SessionManager {
    /// Create a new session manager
    ///
    /// # Arguments
    ///
    /// * `users` - Account store
    /// * `refresh_tokens` - Refresh token store
    /// * `config` - Signing secret, API key, and token lifetimes
    pub fn new(
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            config,
        }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// * `AuthError::EmptyPassword` - Empty plaintext
    /// * `AuthError::HashingFailed` - Hashing failure
    /// * `AuthError::Database` - Store failure
    pub async fn register(&self, email: &str, password: &str) -> AuthResult<User> {
        let password_hash = hashing::hash_password(password)?;
        let user = self.users.create(email, &password_hash).await?;
        log::info!("registered user {}", user.id);
        Ok(user)
    }

    /// Authenticate a credential and open a session
    ///
    /// Unknown email and wrong password both fail with
    /// [`AuthError::InvalidCredentials`] so the client cannot tell which.
    /// On success returns the public user fields together with a fresh access
    /// token and a persisted refresh token.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<(User, SessionTokens)> {
        let record = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !hashing::verify_password(password, &record.password_hash)? {
            log::debug!("failed login attempt for user {}", record.id);
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = tokens::issue_access_token(
            record.id,
            &self.config.jwt_secret,
            self.config.access_token_ttl,
        )?;

        let refresh_token = tokens::generate_refresh_token()?;
        let expires_at = Utc::now() + self.config.refresh_token_ttl;
        self.refresh_tokens
            .create(&refresh_token, record.id, expires_at)
            .await?;

        log::info!("user {} logged in", record.id);
        Ok((
            record.into_public(),
            SessionTokens {
                access_token,
                refresh_token,
            },
        ))
    }

    /// Mint a new access token from a live refresh token
    ///
    /// The refresh token arrives as a bearer credential in the `Authorization`
    /// header. It is neither rotated nor extended on use; revocation semantics
    /// stay simple at the cost of replay detection.
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingAuthHeader` / `MalformedAuthHeader` - Bad header
    /// * `AuthError::InvalidRefreshToken` - Unknown, expired, or revoked token
    pub async fn refresh(&self, authorization: Option<&str>) -> AuthResult<String> {
        let refresh_token = headers::bearer_token(authorization)?;

        let user_id = self
            .refresh_tokens
            .find_live_user(refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        tokens::issue_access_token(user_id, &self.config.jwt_secret, self.config.access_token_ttl)
    }

    /// Revoke the refresh token presented in the `Authorization` header
    ///
    /// Revoking an already-revoked token leaves the same end state; the store
    /// surfaces [`AuthError::NotFound`] for tokens that never existed.
    pub async fn revoke(&self, authorization: Option<&str>) -> AuthResult<()> {
        let refresh_token = headers::bearer_token(authorization)?;
        self.refresh_tokens.revoke(refresh_token).await
    }

    /// Update the calling account's email and password
    ///
    /// The target account is derived from the validated access token, never
    /// from caller-supplied input, so an identity can only update itself.
    pub async fn update_credentials(
        &self,
        authorization: Option<&str>,
        new_email: &str,
        new_password: &str,
    ) -> AuthResult<User> {
        let user_id = self.authenticate(authorization)?;
        let password_hash = hashing::hash_password(new_password)?;
        let user = self
            .users
            .update_credentials(user_id, new_email, &password_hash)
            .await?;
        log::info!("user {} updated credentials", user.id);
        Ok(user)
    }

    /// Resolve the `Authorization` header to an authenticated identity
    ///
    /// For handlers that only need to know who is calling (e.g. creating a
    /// post) before handing ownership checks to the guard.
    pub fn authenticate(&self, authorization: Option<&str>) -> AuthResult<UserId> {
        let token = headers::bearer_token(authorization)?;
        tokens::validate_access_token(token, &self.config.jwt_secret)
    }
}
