//! Database configuration module.

use std::env;

/// Default maximum pool size.
///
/// Auth traffic is all single-row point lookups (one account, one token, one
/// post owner per call), so the pool stays small.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default minimum pool size
pub const DEFAULT_MIN_CONNECTIONS: u32 = 2;

/// Default connection acquire timeout in seconds
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Default idle connection timeout in seconds
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default maximum connection lifetime in seconds
pub const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    /// Create a configuration for `database_url` with the default pool sizing.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            max_lifetime_secs: DEFAULT_MAX_LIFETIME_SECS,
        }
    }

    /// Create configuration from environment variables
    ///
    /// `DATABASE_URL` is required; the pool settings fall back to the
    /// defaults above unless overridden:
    /// - `DB_MAX_CONNECTIONS`
    /// - `DB_MIN_CONNECTIONS`
    /// - `DB_ACQUIRE_TIMEOUT`
    /// - `DB_IDLE_TIMEOUT`
    /// - `DB_MAX_LIFETIME`
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is not set or an override is not a valid
    /// integer.
    pub fn from_env() -> Self {
        let mut config = Self::new(env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

        if let Ok(raw) = env::var("DB_MAX_CONNECTIONS") {
            config.max_connections = raw.parse().expect("DB_MAX_CONNECTIONS must be a valid u32");
        }
        if let Ok(raw) = env::var("DB_MIN_CONNECTIONS") {
            config.min_connections = raw.parse().expect("DB_MIN_CONNECTIONS must be a valid u32");
        }
        if let Ok(raw) = env::var("DB_ACQUIRE_TIMEOUT") {
            config.acquire_timeout_secs = raw.parse().expect("DB_ACQUIRE_TIMEOUT must be a valid u64");
        }
        if let Ok(raw) = env::var("DB_IDLE_TIMEOUT") {
            config.idle_timeout_secs = raw.parse().expect("DB_IDLE_TIMEOUT must be a valid u64");
        }
        if let Ok(raw) = env::var("DB_MAX_LIFETIME") {
            config.max_lifetime_secs = raw.parse().expect("DB_MAX_LIFETIME must be a valid u64");
        }

        config
    }
}
