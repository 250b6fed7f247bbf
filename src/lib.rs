//! # Quill Auth
//!
//! Credential and session-authorization core for the Quill social-post API.
//!
//! For every protected request this crate answers three questions: is the caller
//! who they claim to be, is their session still valid, and may they act on the
//! specific resource they are touching. Everything else (routing, body decoding,
//! static files, process bootstrap) lives in the HTTP layer and talks to this
//! core through a handful of typed calls.
//!
//! ## Core Modules
//!
//! - [`auth`]: password hashing, header extraction, the access-token codec,
//!   the session manager, and the ownership guard
//! - [`db`]: connection pooling and the narrow repository traits the core
//!   requires of its backing store
//! - [`config`]: explicit configuration passed into the manager and guard at
//!   construction; there are no process-wide singletons
//!
//! ## Example
//!
//! ```no_run
//! use quill_auth::{AuthConfig, SessionManager};
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
//!     let (user, tokens) = sessions.login("bird@example.com", "correcthorse").await?;
//!     println!("logged in {} ({})", user.email, tokens.access_token);
//!     Ok(())
//! }
//! ```

/// Authentication, session, and authorization components.
pub mod auth;
pub use auth::{
    AccessTokenClaims, AuthError, AuthResult, OwnershipGuard, SessionManager, SessionTokens, User,
    UserId,
};

/// Database pooling and repository contracts.
pub mod db;

/// Runtime configuration for the auth core.
pub mod config;
pub use config::AuthConfig;
