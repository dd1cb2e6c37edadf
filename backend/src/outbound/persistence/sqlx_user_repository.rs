//! SQLite-backed `UserRepository` implementation using SQLx.
//!
//! Every statement is parameterised and executed inside the caller's
//! [`RequestDeadline`]; when the deadline fires the statement future is
//! dropped and its pooled connection released.

use std::future::Future;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{RequestDeadline, User, UserDraft, UserId};

use super::models::UserRow;
use super::pool::DbPool;
use super::sqlx_error_mapping::map_sqlx_error;

const LIST_USERS: &str = "SELECT id, name, email FROM users ORDER BY id";
const FIND_USER: &str = "SELECT id, name, email FROM users WHERE id = ?1";
const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES (?1, ?2)";
const UPDATE_USER: &str = "UPDATE users SET name = ?1, email = ?2 WHERE id = ?3";
const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";

/// SQLx-backed implementation of the user repository port.
#[derive(Clone, Debug)]
pub struct SqlxUserRepository {
    pool: DbPool,
}

impl SqlxUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Run a statement inside the deadline and normalise both failure sources.
async fn bounded<T, F>(deadline: &RequestDeadline, statement: F) -> Result<T, UserPersistenceError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    deadline.run(statement).await?.map_err(map_sqlx_error)
}

fn require_affected(rows_affected: u64, id: UserId) -> Result<(), UserPersistenceError> {
    if rows_affected == 0 {
        Err(UserPersistenceError::not_found(id))
    } else {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn list(&self, deadline: &RequestDeadline) -> Result<Vec<User>, UserPersistenceError> {
        let rows = bounded(
            deadline,
            sqlx::query_as::<_, UserRow>(LIST_USERS).fetch_all(self.pool.inner()),
        )
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(
        &self,
        id: UserId,
        deadline: &RequestDeadline,
    ) -> Result<User, UserPersistenceError> {
        let row = bounded(
            deadline,
            sqlx::query_as::<_, UserRow>(FIND_USER)
                .bind(id.get())
                .fetch_optional(self.pool.inner()),
        )
        .await?;
        row.map(User::from).ok_or_else(|| UserPersistenceError::not_found(id))
    }

    async fn create(
        &self,
        draft: &UserDraft,
        deadline: &RequestDeadline,
    ) -> Result<User, UserPersistenceError> {
        let result = bounded(
            deadline,
            sqlx::query(INSERT_USER)
                .bind(draft.name().as_str())
                .bind(draft.email().as_str())
                .execute(self.pool.inner()),
        )
        .await?;
        Ok(draft
            .clone()
            .with_id(UserId::new(result.last_insert_rowid())))
    }

    async fn update(
        &self,
        user: &User,
        deadline: &RequestDeadline,
    ) -> Result<(), UserPersistenceError> {
        let result = bounded(
            deadline,
            sqlx::query(UPDATE_USER)
                .bind(user.name().as_str())
                .bind(user.email().as_str())
                .bind(user.id().get())
                .execute(self.pool.inner()),
        )
        .await?;
        require_affected(result.rows_affected(), user.id())
    }

    async fn delete(
        &self,
        id: UserId,
        deadline: &RequestDeadline,
    ) -> Result<(), UserPersistenceError> {
        let result = bounded(
            deadline,
            sqlx::query(DELETE_USER)
                .bind(id.get())
                .execute(self.pool.inner()),
        )
        .await?;
        require_affected(result.rows_affected(), id)
    }
}
