//! Ownership and webhook authorization.
//!
//! Every mutation of an owned resource passes through [`OwnershipGuard`] before
//! the store touches anything. The check order is fixed: the resource's
//! existence is established first (missing -> [`AuthError::NotFound`]), then
//! ownership (mismatch -> [`AuthError::Forbidden`]). The same order applies to
//! every endpoint so error shapes never leak existence.

use std::sync::Arc;

use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};
use super::models::{PostId, UserId};
use super::{headers, tokens};
use crate::config::AuthConfig;
use crate::db::repository::PostStore;

/// Authorization guard for mutations of owned resources
#[derive(Clone)]
pub struct OwnershipGuard {
    posts: Arc<dyn PostStore>,
    config: AuthConfig,
}

impl OwnershipGuard {
    /// Create a new guard over the given resource store
    pub fn new(posts: Arc<dyn PostStore>, config: AuthConfig) -> Self {
        Self { posts, config }
    }

    /// Authorize a mutation of `post_id` by the caller behind `authorization`
    ///
    /// Validates the access token, loads the post's owner, and compares the
    /// two. Returns the caller identity so the handler can proceed with the
    /// mutation.
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingAuthHeader` / `MalformedAuthHeader` - Bad header
    /// * `AuthError::InvalidToken` - Access token rejected
    /// * `AuthError::NotFound` - Post does not exist
    /// * `AuthError::Forbidden` - Caller does not own the post
    pub async fn authorize_mutation(
        &self,
        authorization: Option<&str>,
        post_id: PostId,
    ) -> AuthResult<UserId> {
        let token = headers::bearer_token(authorization)?;
        let caller = tokens::validate_access_token(token, &self.config.jwt_secret)?;

        let owner = self
            .posts
            .owner_of(post_id)
            .await?
            .ok_or(AuthError::NotFound)?;

        Self::require_owner(caller, owner)?;
        Ok(caller)
    }

    /// Authorize an already-extracted access token against a known owner
    ///
    /// For callers that have loaded the resource themselves and only need the
    /// token validated and the ownership decision applied.
    pub fn authorize(&self, access_token: &str, owner: UserId) -> AuthResult<UserId> {
        let caller = tokens::validate_access_token(access_token, &self.config.jwt_secret)?;
        Self::require_owner(caller, owner)?;
        Ok(caller)
    }

    /// The pure allow/deny decision: caller must equal owner.
    pub fn require_owner(caller: UserId, owner: UserId) -> AuthResult<()> {
        if caller != owner {
            log::debug!("user {caller} denied mutation of resource owned by {owner}");
            return Err(AuthError::Forbidden);
        }
        Ok(())
    }

    /// Authorize the server-to-server webhook caller
    ///
    /// Compares the presented key against the configured one in constant time.
    /// This is a weaker, identity-free trust boundary reserved for one trusted
    /// integration; it must never authorize end-user actions.
    pub fn authorize_webhook(&self, authorization: Option<&str>) -> AuthResult<()> {
        let presented = headers::api_key(authorization)?;
        let matches: bool = presented
            .as_bytes()
            .ct_eq(self.config.api_key.as_bytes())
            .into();
        if !matches {
            log::debug!("webhook request rejected: api key mismatch");
            return Err(AuthError::InvalidApiKey);
        }
        Ok(())
    }
}
