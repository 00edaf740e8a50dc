//! User aggregate
//!
//! Contains the User entity, update DTOs, and the repository interface.

pub mod model;
pub mod repository;

mod dto_update;

// Re-export model types
pub use model::User;

// Re-export DTOs
pub use dto_update::{UpdateUserInfoDto, UserChangeset};

// Re-export repository trait
pub use repository::{UserLookup, UserRepositoryInterface};
