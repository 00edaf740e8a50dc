//! # Account Service
//!
//! User-account management: create and look up user records, update
//! profile fields and passwords, and verify credentials.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: User entity, update DTOs, repository port and error kinds
//! - **application**: `UserService` use-cases and persistence error mapping
//! - **infrastructure**: SeaORM (database) and in-memory repository adapters
//! - **shared**: Request context carrying the correlation id

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::UserService;
pub use domain::{UpdateUserInfoDto, User, UserError, UserResult};
pub use shared::RequestContext;

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryUserRepository, UserRepository};
