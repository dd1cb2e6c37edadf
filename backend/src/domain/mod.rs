//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure.
//! - ErrorCode (alias to `error::ErrorCode`): stable error category.
//! - User / UserDraft / UserId: the users entity and its identifier.
//! - RequestDeadline: per-request budget passed to every port call.
//! - UserDirectory: service implementing the user driving ports.

pub mod deadline;
pub mod error;
pub mod ports;
pub mod user;
pub mod user_directory;

pub use self::deadline::{DEFAULT_REQUEST_TIMEOUT, DeadlineElapsed, RequestDeadline};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{
    EmailAddress, User, UserDraft, UserId, UserIdParseError, UserName, UserValidationError,
};
pub use self::user_directory::UserDirectory;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use users_service::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("User not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
