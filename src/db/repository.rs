//! Repository trait definitions for testability and dependency injection.
//!
//! The auth core requires exactly three narrow contracts of its backing store:
//! accounts, refresh tokens, and resource ownership. The store owns the rows
//! and their physical garbage collection; the core issues single,
//! self-contained calls and never retries on failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::auth::errors::{AuthError, AuthResult};
use crate::auth::models::{PostId, User, UserId, UserRecord};

/// Trait for account store operations
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a new account with an already-hashed credential
    async fn create(&self, email: &str, password_hash: &str) -> AuthResult<User>;

    /// Find an account (including its credential hash) by email
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserRecord>>;

    /// Replace an account's email and credential hash
    ///
    /// Returns `AuthError::NotFound` for unknown accounts.
    async fn update_credentials(
        &self,
        user_id: UserId,
        email: &str,
        password_hash: &str,
    ) -> AuthResult<User>;

    /// Flag an account as premium (webhook-driven upgrade)
    ///
    /// Returns `AuthError::NotFound` for unknown accounts.
    async fn set_premium(&self, user_id: UserId) -> AuthResult<()>;
}

/// Trait for refresh token store operations
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Persist a freshly issued refresh token
    async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Resolve a refresh token to its account, excluding revoked rows and rows
    /// at or past expiry in a single atomic lookup
    async fn find_live_user(&self, token: &str) -> AuthResult<Option<UserId>>;

    /// Mark a refresh token revoked
    ///
    /// Idempotent in effect; returns `AuthError::NotFound` if the token was
    /// never issued.
    async fn revoke(&self, token: &str) -> AuthResult<()>;
}

/// Trait for owned-resource lookups
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Look up the owning account of a post, `None` if the post does not exist
    async fn owner_of(&self, post_id: PostId) -> AuthResult<Option<UserId>>;
}

/// Default PostgreSQL implementation of `UserStore`
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        is_premium: row.get("is_premium"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        updated_at: row.get::<chrono::NaiveDateTime, _>("updated_at").and_utc(),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, email: &str, password_hash: &str) -> AuthResult<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, email, hashed_password, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id, email, is_premium, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_from_row(&row))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, hashed_password, is_premium, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| UserRecord {
            id: r.get("id"),
            email: r.get("email"),
            password_hash: r.get("hashed_password"),
            is_premium: r.get("is_premium"),
            created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            updated_at: r.get::<chrono::NaiveDateTime, _>("updated_at").and_utc(),
        }))
    }

    async fn update_credentials(
        &self,
        user_id: UserId,
        email: &str,
        password_hash: &str,
    ) -> AuthResult<User> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, hashed_password = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, is_premium, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::NotFound)?;

        Ok(user_from_row(&row))
    }

    async fn set_premium(&self, user_id: UserId) -> AuthResult<()> {
        let result = sqlx::query("UPDATE users SET is_premium = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }
}

/// Default PostgreSQL implementation of `RefreshTokenStore`
pub struct PgRefreshTokenStore {
    pool: PgPool,
}

impl PgRefreshTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, created_at, updated_at, expires_at)
            VALUES ($1, $2, NOW(), NOW(), $3)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_live_user(&self, token: &str) -> AuthResult<Option<UserId>> {
        // Revocation and expiry are checked in one predicate so a concurrent
        // revoke cannot race a lookup into accepting a dead token.
        let row = sqlx::query(
            r#"
            SELECT user_id
            FROM refresh_tokens
            WHERE token = $1
              AND revoked_at IS NULL
              AND expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get("user_id")))
    }

    async fn revoke(&self, token: &str) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW(), updated_at = NOW()
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound);
        }
        Ok(())
    }
}

/// Default PostgreSQL implementation of `PostStore`
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn owner_of(&self, post_id: PostId) -> AuthResult<Option<UserId>> {
        let row = sqlx::query("SELECT user_id FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("user_id")))
    }
}
