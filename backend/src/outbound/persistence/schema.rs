//! Table definitions for the SQLite schema.
//!
//! The service provisions its single table at startup; there are no further
//! migrations.

use tracing::info;

use super::pool::DbPool;

/// DDL for the users table.
///
/// `AUTOINCREMENT` keeps identifiers of deleted users from being reused.
pub const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
)";

/// Raised when the schema cannot be provisioned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to create users table: {message}")]
pub struct SchemaError {
    message: String,
}

/// Create the users table when it does not exist yet.
///
/// # Errors
///
/// Returns [`SchemaError`] when the DDL statement fails.
pub async fn ensure_users_table(pool: &DbPool) -> Result<(), SchemaError> {
    sqlx::query(CREATE_USERS_TABLE)
        .execute(pool.inner())
        .await
        .map_err(|err| SchemaError {
            message: err.to_string(),
        })?;
    info!("users table exists or was created");
    Ok(())
}
