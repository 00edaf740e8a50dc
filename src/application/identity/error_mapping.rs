//! Translation of persistence failures into user-service errors
//!
//! Every call site in the service passes its failure through
//! [`map_persistence_error`]; nothing from the storage layer is returned
//! to callers unmapped.

use crate::domain::{PersistenceError, UniqueField, UserError};

/// Service operation that issued the failing persistence call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOperation {
    Save,
    Find,
    UpdatePassword,
    UpdateInfo,
}

impl UserOperation {
    /// Generic failure kind for this operation.
    fn failure(self) -> UserError {
        match self {
            Self::Save => UserError::SaveFailure,
            Self::Find => UserError::FindFailure,
            Self::UpdatePassword => UserError::UpdatePasswordFailure,
            Self::UpdateInfo => UserError::UpdateUserInfoFailure,
        }
    }
}

/// Map a persistence failure to the error kind exposed for `operation`.
///
/// Only `Save` reports a nick-name collision as `DuplicateNickName`; every
/// other operation folds it into its generic failure kind.
pub fn map_persistence_error(operation: UserOperation, err: &PersistenceError) -> UserError {
    match operation {
        UserOperation::Save if err.is_unique_violation_on(UniqueField::NickName) => {
            UserError::DuplicateNickName
        }
        _ => operation.failure(),
    }
}
