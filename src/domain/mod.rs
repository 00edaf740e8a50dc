pub mod error;
pub mod user;

// Re-export commonly used types
pub use error::{PersistenceError, PersistenceResult, UniqueField, UserError, UserResult};
pub use user::{UpdateUserInfoDto, User, UserChangeset, UserLookup, UserRepositoryInterface};
