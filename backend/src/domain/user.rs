//! User data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The name was empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The email was empty once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Raised when a path segment does not hold a base-10 user identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must be a base-10 integer, got {raw:?}")]
pub struct UserIdParseError {
    raw: String,
}

/// Store-assigned user identifier.
///
/// Serialised as a bare JSON integer.
///
/// # Examples
/// ```
/// use users_service::domain::UserId;
///
/// let id: UserId = "42".parse().expect("decimal id");
/// assert_eq!(id.get(), 42);
/// assert!("abc".parse::<UserId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self).map_err(|_| UserIdParseError {
            raw: s.to_owned(),
        })
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human readable user name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact email address.
///
/// Only emptiness is checked here; uniqueness is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Name and email for a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: UserName,
    email: EmailAddress,
}

impl UserDraft {
    /// Pair a validated name and email.
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Validate raw strings into a draft.
    ///
    /// The name is checked first, so a payload missing both fields reports
    /// [`UserValidationError::EmptyName`].
    pub fn try_from_strings(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserName::new(name)?, EmailAddress::new(email)?))
    }

    /// Draft name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Draft email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - `name` and `email` are non-empty once trimmed of whitespace when
///   accepted from a client. Rows read back from the store are returned as
///   stored.
///
/// On the wire: `{"id": 1, "name": "Ada", "email": "ada@example.com"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
}

impl User {
    /// Build a user from validated parts.
    pub fn new(id: UserId, name: UserName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Validate raw parts into a user.
    pub fn try_from_parts(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(UserDraft::try_from_strings(name, email)?.with_id(UserId::new(id)))
    }

    /// Rebuild a user from a stored row without re-validating it.
    ///
    /// Rows written before validation existed may hold blank fields; reads
    /// must still return them.
    pub(crate) fn from_stored(id: i64, name: String, email: String) -> Self {
        Self {
            id: UserId::new(id),
            name: UserName(name),
            email: EmailAddress(email),
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// User name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// User email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}
