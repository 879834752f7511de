//! # chat-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Every service borrows a [`ServiceContext`] and is cheap to construct per
//! request:
//!
//! ```rust,ignore
//! let ctx = ServiceContext::builder().store(MemoryStore::new()).build()?;
//! let allowed = PermissionService::new(&ctx)
//!     .user_has_permission(user_id, PermissionKey::ManagePins, None)
//!     .await?;
//! ```

pub mod dto;
pub mod services;

pub use services::{
    MentionService, MessageService, PermissionService, PinService, RoleService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SettingsService, UserService,
};
