//! Integration tests for the session lifecycle and authorization guard.
//!
//! Runs the manager and guard against in-memory store implementations so the
//! full login -> refresh -> revoke flow and the ownership checks are exercised
//! without a database.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use quill_auth::auth::models::RefreshTokenRecord;
use quill_auth::auth::{AuthError, AuthResult, OwnershipGuard, SessionManager};
use quill_auth::auth::{PostId, User, UserId, UserRecord};
use quill_auth::config::AuthConfig;
use quill_auth::db::{PostStore, RefreshTokenStore, UserStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

struct InMemoryUserStore {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, email: &str, password_hash: &str) -> AuthResult<User> {
        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_premium: false,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(record.id, record.clone());
        Ok(record.into_public())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<UserRecord>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_credentials(
        &self,
        user_id: UserId,
        email: &str,
        password_hash: &str,
    ) -> AuthResult<User> {
        let mut users = self.users.lock().unwrap();
        let record = users.get_mut(&user_id).ok_or(AuthError::NotFound)?;
        record.email = email.to_string();
        record.password_hash = password_hash.to_string();
        record.updated_at = Utc::now();
        Ok(record.clone().into_public())
    }

    async fn set_premium(&self, user_id: UserId) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        let record = users.get_mut(&user_id).ok_or(AuthError::NotFound)?;
        record.is_premium = true;
        Ok(())
    }
}

struct InMemoryRefreshTokenStore {
    tokens: Mutex<HashMap<String, RefreshTokenRecord>>,
}

impl InMemoryRefreshTokenStore {
    fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RefreshTokenStore for InMemoryRefreshTokenStore {
    async fn create(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let record = RefreshTokenRecord {
            token: token.to_string(),
            user_id,
            created_at: Utc::now(),
            expires_at,
            revoked_at: None,
        };
        self.tokens.lock().unwrap().insert(token.to_string(), record);
        Ok(())
    }

    async fn find_live_user(&self, token: &str) -> AuthResult<Option<UserId>> {
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens
            .get(token)
            .filter(|record| record.is_live(Utc::now()))
            .map(|record| record.user_id))
    }

    async fn revoke(&self, token: &str) -> AuthResult<()> {
        let mut tokens = self.tokens.lock().unwrap();
        let record = tokens.get_mut(token).ok_or(AuthError::NotFound)?;
        if record.revoked_at.is_none() {
            record.revoked_at = Some(Utc::now());
        }
        Ok(())
    }
}

struct InMemoryPostStore {
    owners: Mutex<HashMap<PostId, UserId>>,
}

impl InMemoryPostStore {
    fn new() -> Self {
        Self {
            owners: Mutex::new(HashMap::new()),
        }
    }

    fn insert(&self, post_id: PostId, owner: UserId) {
        self.owners.lock().unwrap().insert(post_id, owner);
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn owner_of(&self, post_id: PostId) -> AuthResult<Option<UserId>> {
        Ok(self.owners.lock().unwrap().get(&post_id).copied())
    }
}

fn test_config() -> AuthConfig {
    AuthConfig::new(
        "test_secret_key_for_testing_only".to_string(),
        "test_api_key_for_testing_only".to_string(),
    )
}

fn setup_manager(config: AuthConfig) -> SessionManager {
    SessionManager::new(
        Arc::new(InMemoryUserStore::new()),
        Arc::new(InMemoryRefreshTokenStore::new()),
        config,
    )
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

// ============================================================================
// Session lifecycle
// ============================================================================

#[tokio::test]
async fn test_register_login_refresh_revoke_flow() {
    let sessions = setup_manager(test_config());

    let user = sessions
        .register("bird@example.com", "correcthorse")
        .await
        .expect("registration should succeed");
    assert_eq!(user.email, "bird@example.com");
    assert!(!user.is_premium);

    // Login with the right password yields a valid access token and a
    // persisted refresh token.
    let (login_user, tokens) = sessions
        .login("bird@example.com", "correcthorse")
        .await
        .expect("login should succeed");
    assert_eq!(login_user.id, user.id);
    assert_eq!(tokens.refresh_token.len(), 64);

    let caller = sessions
        .authenticate(Some(&bearer(&tokens.access_token)))
        .expect("freshly issued access token should validate");
    assert_eq!(caller, user.id);

    // Refresh mints a new, independently valid access token.
    let new_access = sessions
        .refresh(Some(&bearer(&tokens.refresh_token)))
        .await
        .expect("refresh with a live token should succeed");
    assert_eq!(
        sessions.authenticate(Some(&bearer(&new_access))).unwrap(),
        user.id
    );

    // Revoke, then the same refresh token is dead.
    sessions
        .revoke(Some(&bearer(&tokens.refresh_token)))
        .await
        .expect("revoke should succeed");
    let err = sessions
        .refresh(Some(&bearer(&tokens.refresh_token)))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidRefreshToken));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_identical() {
    let sessions = setup_manager(test_config());
    sessions
        .register("bird@example.com", "correcthorse")
        .await
        .unwrap();

    let wrong_password = sessions
        .login("bird@example.com", "wronghorse")
        .await
        .unwrap_err();
    let unknown_email = sessions
        .login("nobody@example.com", "correcthorse")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.client_message(), unknown_email.client_message());
}

#[tokio::test]
async fn test_register_rejects_empty_password() {
    let sessions = setup_manager(test_config());
    let err = sessions.register("bird@example.com", "").await.unwrap_err();
    assert!(matches!(err, AuthError::EmptyPassword));
}

#[tokio::test]
async fn test_expired_refresh_token_is_dead_without_revocation() {
    let mut config = test_config();
    config.refresh_token_ttl = Duration::seconds(-1);
    let sessions = setup_manager(config);

    sessions
        .register("bird@example.com", "correcthorse")
        .await
        .unwrap();
    let (_, tokens) = sessions
        .login("bird@example.com", "correcthorse")
        .await
        .unwrap();

    let err = sessions
        .refresh(Some(&bearer(&tokens.refresh_token)))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidRefreshToken));
}

#[tokio::test]
async fn test_revoke_unknown_token_is_not_found() {
    let sessions = setup_manager(test_config());
    let err = sessions
        .revoke(Some("Bearer never-issued"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotFound));
}

#[tokio::test]
async fn test_refresh_requires_bearer_header() {
    let sessions = setup_manager(test_config());
    assert!(matches!(
        sessions.refresh(None).await.unwrap_err(),
        AuthError::MissingAuthHeader
    ));
    assert!(matches!(
        sessions.refresh(Some("Basic abc")).await.unwrap_err(),
        AuthError::MalformedAuthHeader
    ));
}

// ============================================================================
// Credential updates
// ============================================================================

#[tokio::test]
async fn test_update_credentials_replaces_login() {
    let sessions = setup_manager(test_config());
    sessions
        .register("bird@example.com", "correcthorse")
        .await
        .unwrap();
    let (user, tokens) = sessions
        .login("bird@example.com", "correcthorse")
        .await
        .unwrap();

    let updated = sessions
        .update_credentials(
            Some(&bearer(&tokens.access_token)),
            "owl@example.com",
            "batterystaple",
        )
        .await
        .expect("credential update should succeed");
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.email, "owl@example.com");

    // The old credential is gone, the new one works.
    assert!(matches!(
        sessions
            .login("bird@example.com", "correcthorse")
            .await
            .unwrap_err(),
        AuthError::InvalidCredentials
    ));
    let (relogin, _) = sessions
        .login("owl@example.com", "batterystaple")
        .await
        .unwrap();
    assert_eq!(relogin.id, user.id);
}

#[tokio::test]
async fn test_update_credentials_rejects_bad_token() {
    let sessions = setup_manager(test_config());
    let err = sessions
        .update_credentials(Some("Bearer not.a.jwt"), "owl@example.com", "batterystaple")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

// ============================================================================
// Ownership guard
// ============================================================================

async fn setup_guarded_post() -> (SessionManager, OwnershipGuard, UserId, PostId, String) {
    let config = test_config();
    let sessions = setup_manager(config.clone());
    let posts = Arc::new(InMemoryPostStore::new());
    let guard = OwnershipGuard::new(posts.clone(), config);

    sessions
        .register("owner@example.com", "correcthorse")
        .await
        .unwrap();
    let (owner, tokens) = sessions
        .login("owner@example.com", "correcthorse")
        .await
        .unwrap();

    let post_id = Uuid::new_v4();
    posts.insert(post_id, owner.id);

    (sessions, guard, owner.id, post_id, tokens.access_token)
}

#[tokio::test]
async fn test_guard_allows_owner() {
    let (_, guard, owner_id, post_id, owner_token) = setup_guarded_post().await;

    let caller = guard
        .authorize_mutation(Some(&bearer(&owner_token)), post_id)
        .await
        .expect("owner should be allowed");
    assert_eq!(caller, owner_id);
}

#[tokio::test]
async fn test_guard_denies_non_owner() {
    let (sessions, guard, _, post_id, _) = setup_guarded_post().await;

    sessions
        .register("intruder@example.com", "correcthorse")
        .await
        .unwrap();
    let (_, tokens) = sessions
        .login("intruder@example.com", "correcthorse")
        .await
        .unwrap();

    let err = guard
        .authorize_mutation(Some(&bearer(&tokens.access_token)), post_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Forbidden));
}

#[tokio::test]
async fn test_guard_reports_missing_post_before_ownership() {
    let (_, guard, _, _, owner_token) = setup_guarded_post().await;

    // Valid caller, nonexistent resource: NotFound, never Forbidden.
    let err = guard
        .authorize_mutation(Some(&bearer(&owner_token)), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotFound));
}

#[tokio::test]
async fn test_guard_direct_authorize() {
    let (_, guard, owner_id, _, owner_token) = setup_guarded_post().await;

    assert_eq!(guard.authorize(&owner_token, owner_id).unwrap(), owner_id);
    assert!(matches!(
        guard.authorize(&owner_token, Uuid::new_v4()).unwrap_err(),
        AuthError::Forbidden
    ));
}

#[tokio::test]
async fn test_guard_rejects_invalid_token_before_lookup() {
    let (_, guard, _, post_id, _) = setup_guarded_post().await;

    let err = guard
        .authorize_mutation(Some("Bearer forged"), post_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

// ============================================================================
// Webhook path
// ============================================================================

#[tokio::test]
async fn test_webhook_key_gate_and_premium_upgrade() {
    let config = test_config();
    let users = Arc::new(InMemoryUserStore::new());
    let sessions = SessionManager::new(
        users.clone(),
        Arc::new(InMemoryRefreshTokenStore::new()),
        config.clone(),
    );
    let guard = OwnershipGuard::new(Arc::new(InMemoryPostStore::new()), config);

    let user = sessions
        .register("bird@example.com", "correcthorse")
        .await
        .unwrap();

    guard
        .authorize_webhook(Some("ApiKey test_api_key_for_testing_only"))
        .expect("configured key should be accepted");
    users.set_premium(user.id).await.unwrap();

    let record = users
        .find_by_email("bird@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(record.is_premium);

    assert!(matches!(
        guard.authorize_webhook(Some("ApiKey wrong_key")).unwrap_err(),
        AuthError::InvalidApiKey
    ));
    assert!(matches!(
        guard.authorize_webhook(None).unwrap_err(),
        AuthError::MissingAuthHeader
    ));
    // A bearer credential never satisfies the webhook gate.
    assert!(matches!(
        guard
            .authorize_webhook(Some("Bearer test_api_key_for_testing_only"))
            .unwrap_err(),
        AuthError::MalformedAuthHeader
    ));

    assert!(matches!(
        users.set_premium(Uuid::new_v4()).await.unwrap_err(),
        AuthError::NotFound
    ));
}
