//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to read users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, RequestDeadline, User, UserId};

/// Domain use-case port for reading users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user; an empty directory yields an empty list.
    async fn list_users(&self, deadline: &RequestDeadline) -> Result<Vec<User>, Error>;

    /// Return a single user, or a not-found error.
    async fn get_user(&self, id: UserId, deadline: &RequestDeadline) -> Result<User, Error>;
}
