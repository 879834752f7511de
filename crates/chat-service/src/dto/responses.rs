//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chat_core::entities::{Message, Role, User};
use chat_core::{PermissionSet, RoleId, Snowflake};
use serde::Serialize;

/// A freshly created message and the users it mentions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMessage {
    pub message: Message,
    pub mentions: Vec<Snowflake>,
}

/// Pinned messages of a channel, oldest pin first
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedMessages {
    pub channel_id: Snowflake,
    pub messages: Vec<Message>,
}

/// Role as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub id: RoleId,
    pub name: String,
    pub permissions: PermissionSet,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            permissions: role.permissions,
        }
    }
}

/// Public view of a user, without email or read state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Snowflake,
    pub username: String,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
    pub role_ids: Vec<Snowflake>,
}

impl UserProfile {
    pub fn new(user: User, avatar_url: String) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar_url,
            role_ids: user.role_ids.into_iter().collect(),
        }
    }
}
