//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod error;
pub mod mention;
pub mod message;
pub mod permission;
pub mod pin;
pub mod role;
pub mod settings;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use mention::MentionService;
pub use message::MessageService;
pub use permission::PermissionService;
pub use pin::PinService;
pub use role::RoleService;
pub use settings::SettingsService;
pub use user::UserService;
