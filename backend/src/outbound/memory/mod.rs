//! Process-local user repository.
//!
//! Mirrors the SQLite adapter's observable behaviour: identifiers are
//! assigned monotonically and never reused, emails are unique, and writes to
//! missing rows report `NotFound`. Nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{RequestDeadline, User, UserDraft, UserId};

const UNIQUE_EMAIL_VIOLATION: &str = "UNIQUE constraint failed: users.email";

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

impl Table {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|user| user.email().as_str() == email && Some(user.id()) != except)
    }
}

/// In-memory implementation of the user repository port.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, UserPersistenceError> {
        self.table
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user table lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, deadline: &RequestDeadline) -> Result<Vec<User>, UserPersistenceError> {
        deadline.ensure_open()?;
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: UserId,
        deadline: &RequestDeadline,
    ) -> Result<User, UserPersistenceError> {
        deadline.ensure_open()?;
        self.lock()?
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| UserPersistenceError::not_found(id))
    }

    async fn create(
        &self,
        draft: &UserDraft,
        deadline: &RequestDeadline,
    ) -> Result<User, UserPersistenceError> {
        deadline.ensure_open()?;
        let mut table = self.lock()?;
        if table.email_taken(draft.email().as_str(), None) {
            return Err(UserPersistenceError::query(UNIQUE_EMAIL_VIOLATION));
        }
        table.last_id += 1;
        let user = draft.clone().with_id(UserId::new(table.last_id));
        table.rows.insert(user.id(), user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        user: &User,
        deadline: &RequestDeadline,
    ) -> Result<(), UserPersistenceError> {
        deadline.ensure_open()?;
        let mut table = self.lock()?;
        if !table.rows.contains_key(&user.id()) {
            return Err(UserPersistenceError::not_found(user.id()));
        }
        if table.email_taken(user.email().as_str(), Some(user.id())) {
            return Err(UserPersistenceError::query(UNIQUE_EMAIL_VIOLATION));
        }
        table.rows.insert(user.id(), user.clone());
        Ok(())
    }

    async fn delete(
        &self,
        id: UserId,
        deadline: &RequestDeadline,
    ) -> Result<(), UserPersistenceError> {
        deadline.ensure_open()?;
        self.lock()?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| UserPersistenceError::not_found(id))
    }
}
