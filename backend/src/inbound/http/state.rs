//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};
use crate::domain::{DEFAULT_REQUEST_TIMEOUT, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    /// Budget for the data access made on behalf of a single request.
    pub request_timeout: Duration,
}

impl HttpState {
    /// Construct state from the user ports with the default request budget.
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Wire both ports to a [`UserDirectory`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_service::inbound::http::state::HttpState;
    /// use users_service::outbound::memory::InMemoryUserRepository;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
    /// assert_eq!(state.request_timeout.as_secs(), 5);
    /// ```
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: UserRepository + ?Sized + 'static,
    {
        let directory = Arc::new(UserDirectory::new(repository));
        Self::new(directory.clone(), directory)
    }

    /// Override the per-request budget.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}
