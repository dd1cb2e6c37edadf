//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{RequestDeadline, User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Normalised outcomes of a failed user repository call.
    ///
    /// `NotFound` is the only variant callers may treat as a client error;
    /// every other variant is an opaque store failure.
    pub enum UserPersistenceError {
        /// No row matched the primary key, or a write affected zero rows.
        NotFound { id: UserId } => "user {id} not found",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution, including constraint
        /// violations.
        Query { message: String } => "user repository query failed: {message}",
        /// The request deadline passed before the statement completed.
        Timeout => "user repository call exceeded the request deadline",
    }
}

impl UserPersistenceError {
    /// Backend detail without the port's own prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Connection { message } | Self::Query { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<crate::domain::DeadlineElapsed> for UserPersistenceError {
    fn from(_: crate::domain::DeadlineElapsed) -> Self {
        Self::Timeout
    }
}

/// Store capability over the `users` table.
///
/// Every call is bounded by the supplied deadline; implementations must stop
/// waiting on their backend once it passes and report
/// [`UserPersistenceError::Timeout`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return every stored user ordered by identifier; empty when none exist.
    async fn list(&self, deadline: &RequestDeadline) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(
        &self,
        id: UserId,
        deadline: &RequestDeadline,
    ) -> Result<User, UserPersistenceError>;

    /// Insert a new user and return it with its assigned identifier.
    ///
    /// A duplicate email surfaces as [`UserPersistenceError::Query`].
    async fn create(
        &self,
        draft: &UserDraft,
        deadline: &RequestDeadline,
    ) -> Result<User, UserPersistenceError>;

    /// Replace the name and email of an existing user.
    async fn update(
        &self,
        user: &User,
        deadline: &RequestDeadline,
    ) -> Result<(), UserPersistenceError>;

    /// Remove a user by identifier.
    async fn delete(
        &self,
        id: UserId,
        deadline: &RequestDeadline,
    ) -> Result<(), UserPersistenceError>;
}
