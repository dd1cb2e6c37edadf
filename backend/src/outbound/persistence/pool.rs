//! Async connection pool for SQLite via SQLx.
//!
//! This module wraps `sqlx`'s SQLite pool to provide an ergonomic, cloneable
//! handle for the persistence layer. The pool manages connection lifecycle
//! and checkout with configurable limits.
//!
//! # Design
//!
//! - WAL journal mode so readers do not block the single writer
//! - The database file is created when missing
//! - All errors are mapped to `PoolError` variants

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The database URL could not be parsed.
    #[error("invalid database url: {message}")]
    InvalidUrl { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create an invalid URL error with the given message.
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the database connection pool.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use users_service::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("sqlite:mydb.sqlite")
///     .with_max_size(8)
///     .with_connection_timeout(Duration::from_secs(3));
/// assert_eq!(config.database_url(), "sqlite:mydb.sqlite");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Create a new configuration with the given database URL.
    ///
    /// Uses sensible defaults:
    /// - `max_size`: 5 connections
    /// - `connection_timeout`: 30 seconds
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 5,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum number of connections in the pool.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the connection checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Get the database URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Async connection pool for SQLite.
///
/// Cheap to clone; every clone shares the same underlying connections and is
/// safe to use from concurrent requests.
#[derive(Clone)]
pub struct DbPool {
    inner: SqlitePool,
}

impl std::fmt::Debug for DbPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbPool").finish_non_exhaustive()
    }
}

impl DbPool {
    /// Create a new connection pool with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::InvalidUrl` for an unparsable URL and
    /// `PoolError::Build` when the first connection cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|err| PoolError::invalid_url(err.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_size)
            .acquire_timeout(config.connection_timeout)
            .connect_with(options)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Borrow the underlying SQLx pool for statement execution.
    pub fn inner(&self) -> &SqlitePool {
        &self.inner
    }

    /// Close every connection; subsequent checkouts fail.
    pub async fn close(&self) {
        self.inner.close().await;
    }
}
