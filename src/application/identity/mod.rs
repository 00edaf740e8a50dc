//! Identity module: user account management
//!
//! Contains the `UserService` which orchestrates the user-account use-cases
//! (save, lookup, password verification, profile and password updates) and
//! the mapping from persistence failures to user-facing error kinds.

pub mod error_mapping;
pub mod service;

pub use error_mapping::{map_persistence_error, UserOperation};
pub use service::UserService;
