//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use chat_core::PermissionSet;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Role Requests
// ============================================================================

/// Create role request
///
/// The name must also pass [`chat_core::is_name_valid`], which the role
/// service checks separately so it can report `INVALID_NAME`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 32, message = "Role name must be 1-32 characters"))]
    pub name: String,

    #[serde(default)]
    pub permissions: PermissionSet,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Create message request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message text must be 1-2000 characters"))]
    pub text: String,
}

impl CreateMessageRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// ============================================================================
// Settings Requests
// ============================================================================

/// Update server settings request
///
/// Absent fields are left unchanged. The role prioritization order is not
/// part of this request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 100, message = "Server name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default, rename = "iconURL")]
    #[validate(length(min = 1, max = 2048, message = "Icon URL must be 1-2048 characters"))]
    pub icon_url: Option<String>,
}
