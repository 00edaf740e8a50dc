//! Domain errors
//!
//! Two layers of failure live here: [`PersistenceError`] is what a
//! persistence adapter reports through the port, [`UserError`] is the stable
//! taxonomy handed to callers of the user service. The two are kept apart so
//! storage-engine details never reach the caller.

use std::fmt;

use thiserror::Error;

/// Column whose uniqueness constraint was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Id,
    NickName,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::NickName => write!(f, "nick_name"),
        }
    }
}

/// Failure reported by a [`UserRepositoryInterface`](crate::domain::UserRepositoryInterface)
/// implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("Unique constraint violated on {field}")]
    UniqueViolation { field: UniqueField },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),
}

impl PersistenceError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if the caller retries.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    pub fn is_unique_violation_on(&self, field: UniqueField) -> bool {
        matches!(self, Self::UniqueViolation { field: f } if *f == field)
    }
}

/// Result type for persistence port calls
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors surfaced by the user service.
///
/// The `Display` text is the human-readable message; [`UserError::code`]
/// is the machine-readable kind.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("NickName is not unique")]
    DuplicateNickName,

    #[error("Fail to save user")]
    SaveFailure,

    #[error("Fail to find user")]
    FindFailure,

    #[error("No user found")]
    NoUserFound,

    #[error("Password is not correct")]
    PasswordMismatch,

    #[error("Fail to update password")]
    UpdatePasswordFailure,

    #[error("Fail to update user info")]
    UpdateUserInfoFailure,
}

impl UserError {
    /// Stable error code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateNickName => "NICK_NAME_NOT_UNIQUE",
            Self::SaveFailure => "SAVE_USER_FAIL",
            Self::FindFailure => "FIND_USER_FAIL",
            Self::NoUserFound => "NO_USER_FOUND",
            Self::PasswordMismatch => "PASSWORD_NOT_CORRECT",
            Self::UpdatePasswordFailure => "UPDATE_PASSWORD_FAIL",
            Self::UpdateUserInfoFailure => "UPDATE_USER_INFO_FAIL",
        }
    }
}

/// Result type for user service operations
pub type UserResult<T> = Result<T, UserError>;
