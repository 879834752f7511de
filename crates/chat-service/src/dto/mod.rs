//! Data transfer objects for service requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for caller inputs
//! - Response DTOs for serializing service outputs

pub mod requests;
pub mod responses;

pub use requests::{CreateMessageRequest, CreateRoleRequest, UpdateSettingsRequest};
pub use responses::{CreatedMessage, PinnedMessages, RoleResponse, UserProfile};
