//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, RequestDeadline, User, UserDraft, UserId};

/// Domain use-case port for creating, replacing and removing users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return it with the assigned identifier.
    async fn create_user(&self, draft: UserDraft, deadline: &RequestDeadline)
    -> Result<User, Error>;

    /// Replace the name and email of the user carrying `user.id()`.
    async fn update_user(&self, user: User, deadline: &RequestDeadline) -> Result<(), Error>;

    /// Remove the user with the given identifier.
    async fn delete_user(&self, id: UserId, deadline: &RequestDeadline) -> Result<(), Error>;
}
