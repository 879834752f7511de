//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chat_core::{PermissionKey, PermissionSet};
use chat_service::dto::{CreateMessageRequest, CreateRoleRequest, UpdateSettingsRequest};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A username no other test uses
pub fn unique_username() -> String {
    format!("testuser{}", unique_suffix())
}

/// Build a permission set from `(key, granted)` pairs
pub fn perms(entries: &[(PermissionKey, bool)]) -> PermissionSet {
    entries.iter().copied().collect()
}

/// Grant every key
pub fn admin_perms() -> PermissionSet {
    PermissionKey::ALL.into_iter().map(|key| (key, true)).collect()
}

/// Role request with a unique valid name
pub fn role_request(permissions: PermissionSet) -> CreateRoleRequest {
    CreateRoleRequest {
        name: format!("role-{}", unique_suffix()),
        permissions,
    }
}

pub fn message(text: impl Into<String>) -> CreateMessageRequest {
    CreateMessageRequest::new(text)
}

pub fn rename_server(name: &str) -> UpdateSettingsRequest {
    UpdateSettingsRequest {
        name: Some(name.to_string()),
        icon_url: None,
    }
}
