//! Authentication module providing credential, session, and authorization primitives.
//!
//! This module implements the security-sensitive core of the API:
//! - Argon2id password hashing with self-describing PHC output
//! - JWT access tokens (1-hour expiry, stateless validation)
//! - Opaque refresh tokens (60-day expiry, persisted, revocable, never rotated)
//! - Bearer/API-key extraction from the `Authorization` header
//! - Ownership checks gating every mutation of an owned resource
//!
//! ## Example
//!
//! ```no_run
//! use quill_auth::auth::SessionManager;
//! use quill_auth::config::AuthConfig;
//! use quill_auth::db::{Database, DatabaseConfig, PgRefreshTokenStore, PgUserStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect(&DatabaseConfig::from_env()).await?;
//!     let sessions = SessionManager::new(
//!         Arc::new(PgUserStore::new(db.pool().clone())),
//!         Arc::new(PgRefreshTokenStore::new(db.pool().clone())),
//!         AuthConfig::from_env(),
//!     );
//!
//!     let user = sessions.register("bird@example.com", "correcthorse").await?;
//!     println!("registered {}", user.email);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod guard;
pub mod hashing;
pub mod headers;
pub mod manager;
pub mod models;
pub mod tokens;

pub use errors::{AuthError, AuthResult};
pub use guard::OwnershipGuard;
pub use manager::SessionManager;
pub use models::{
    AccessTokenClaims, PostId, RefreshTokenRecord, SessionTokens, User, UserId, UserRecord,
};
