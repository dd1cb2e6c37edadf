//! Shared SQLx error mapping for the user repository.

use tracing::debug;

use crate::domain::ports::UserPersistenceError;

/// Map SQLx failures onto the user port's connection/query split.
///
/// Database errors keep the engine's message (for example
/// `UNIQUE constraint failed: users.email`) so create failures can report it.
pub(super) fn map_sqlx_error(error: sqlx::Error) -> UserPersistenceError {
    match &error {
        sqlx::Error::Database(db) => {
            debug!(code = ?db.code(), message = db.message(), "sqlx operation failed");
        }
        other => debug!(error = %other, "sqlx operation failed"),
    }

    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_) => UserPersistenceError::connection("database connection error"),
        sqlx::Error::Database(db) => UserPersistenceError::query(db.message()),
        _ => UserPersistenceError::query("database error"),
    }
}
