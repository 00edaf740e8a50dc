use async_trait::async_trait;

use super::{User, UserChangeset};
use crate::domain::PersistenceResult;

/// Predicate for looking up a single user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLookup<'a> {
    Id(&'a str),
    NickName(&'a str),
}

/// Storage capability the user service depends on.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Insert the user, or overwrite the stored record with the same id.
    /// Returns the record as persisted.
    async fn create_or_save(&self, user: User) -> PersistenceResult<User>;

    /// Find at most one user matching `lookup`. Absence is `Ok(None)`.
    async fn find_one(&self, lookup: UserLookup<'_>) -> PersistenceResult<Option<User>>;

    /// Write only the `Some` fields of `changes` to the user with `id`.
    /// Addressing an unknown id is not an error.
    async fn update_fields(&self, id: &str, changes: UserChangeset) -> PersistenceResult<()>;
}
