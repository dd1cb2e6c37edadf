//! User directory service implementing the driving ports.
//!
//! Translates repository outcomes into domain errors. Store failures are
//! logged with their backend detail here and reach clients only as the
//! generic messages below, except on create where the detail is appended.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, RequestDeadline, User, UserDraft, UserId};

pub(crate) const USER_NOT_FOUND: &str = "User not found";

/// Service backing both user ports with a single repository.
pub struct UserDirectory<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> UserDirectory<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserDirectory<R>
where
    R: UserRepository + ?Sized,
{
    /// Map a failure to 404 when no row matched, or to `fallback` otherwise.
    fn map_keyed_error(
        operation: &'static str,
        fallback: &'static str,
        err: UserPersistenceError,
    ) -> Error {
        match err {
            UserPersistenceError::NotFound { id } => {
                warn!(%id, operation, "user not found");
                Error::not_found(USER_NOT_FOUND)
            }
            other => {
                error!(error = %other, operation, "user repository failure");
                Error::internal(fallback)
            }
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectory<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self, deadline: &RequestDeadline) -> Result<Vec<User>, Error> {
        self.repository.list(deadline).await.map_err(|err| {
            error!(error = %err, operation = "list", "user repository failure");
            Error::internal("Could not get users")
        })
    }

    async fn get_user(&self, id: UserId, deadline: &RequestDeadline) -> Result<User, Error> {
        self.repository
            .find_by_id(id, deadline)
            .await
            .map_err(|err| Self::map_keyed_error("get", "Could not get user", err))
    }
}

#[async_trait]
impl<R> UsersCommand for UserDirectory<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(
        &self,
        draft: UserDraft,
        deadline: &RequestDeadline,
    ) -> Result<User, Error> {
        self.repository
            .create(&draft, deadline)
            .await
            .map_err(|err| {
                error!(error = %err, operation = "create", "user repository failure");
                Error::internal(format!("Could not create user: {}", err.detail()))
            })
    }

    async fn update_user(&self, user: User, deadline: &RequestDeadline) -> Result<(), Error> {
        self.repository
            .update(&user, deadline)
            .await
            .map_err(|err| Self::map_keyed_error("update", "Could not update user", err))
    }

    async fn delete_user(&self, id: UserId, deadline: &RequestDeadline) -> Result<(), Error> {
        self.repository
            .delete(id, deadline)
            .await
            .map_err(|err| Self::map_keyed_error("delete", "Could not delete user", err))
    }
}
