//! Request-scoped deadlines for data access calls.
//!
//! A [`RequestDeadline`] is created once per inbound request and passed
//! explicitly into every port call made on its behalf. Adapters wrap their
//! I/O in [`RequestDeadline::run`], so an expired deadline drops the in-flight
//! future and releases whatever connection it held.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Default processing budget for a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Returned when a deadline passes before the guarded work completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request deadline elapsed")]
pub struct DeadlineElapsed;

/// Point in time by which a request's data access must finish.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use users_service::domain::RequestDeadline;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let deadline = RequestDeadline::after(Duration::from_secs(5));
/// let value = deadline.run(async { 7 }).await.expect("finishes in time");
/// assert_eq!(value, 7);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDeadline {
    expires_at: Instant,
}

impl RequestDeadline {
    /// Start a deadline that expires `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
        }
    }

    /// Deadline expiring at a fixed instant.
    pub const fn at(expires_at: Instant) -> Self {
        Self { expires_at }
    }

    /// Instant at which the deadline expires.
    pub const fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Time left before expiry, zero once elapsed.
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has already passed.
    pub fn is_elapsed(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Fail fast when the deadline has passed.
    pub fn ensure_open(&self) -> Result<(), DeadlineElapsed> {
        if self.is_elapsed() {
            Err(DeadlineElapsed)
        } else {
            Ok(())
        }
    }

    /// Drive `work` to completion unless the deadline passes first.
    ///
    /// Work is never started once the deadline has elapsed. On expiry the
    /// future is dropped, cancelling it.
    pub async fn run<F>(&self, work: F) -> Result<F::Output, DeadlineElapsed>
    where
        F: Future,
    {
        self.ensure_open()?;
        tokio::time::timeout_at(self.expires_at, work)
            .await
            .map_err(|_| DeadlineElapsed)
    }
}
