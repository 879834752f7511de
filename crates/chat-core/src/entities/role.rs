//! Role entity - a named bundle of permission assignments

use serde::{Deserialize, Serialize};

use crate::value_objects::{PermissionKey, PermissionSet, RoleId, Snowflake};

/// Role record as persisted in the role store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl Role {
    /// Create a real (non-synthetic) role
    pub fn new(id: Snowflake, name: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            id: RoleId::Custom(id),
            name: name.into(),
            permissions,
        }
    }

    /// Baseline record for `_user`: authenticated users may post
    pub fn default_user() -> Self {
        Self {
            id: RoleId::User,
            name: "User".to_string(),
            permissions: PermissionSet::new().with(PermissionKey::SendMessages, true),
        }
    }

    /// Baseline record for `_everyone`: anyone may read
    pub fn default_everyone() -> Self {
        Self {
            id: RoleId::Everyone,
            name: "Everyone".to_string(),
            permissions: PermissionSet::new().with(PermissionKey::ReadMessages, true),
        }
    }

    /// Default record for a synthetic ID; `None` for real roles
    pub fn synthetic_default(id: RoleId) -> Option<Self> {
        match id {
            RoleId::User => Some(Self::default_user()),
            RoleId::Everyone => Some(Self::default_everyone()),
            RoleId::Custom(_) => None,
        }
    }

    #[inline]
    pub fn is_synthetic(&self) -> bool {
        self.id.is_synthetic()
    }
}
