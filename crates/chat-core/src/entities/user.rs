//! User entity - a chat account and its role assignments

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// User record
///
/// `role_ids` only ever holds real roles; `_user` and `_everyone` apply
/// implicitly and cannot be expressed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role_ids: BTreeSet<Snowflake>,
    #[serde(default)]
    pub last_read_channel_dates: HashMap<Snowflake, DateTime<Utc>>,
}

impl User {
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            role_ids: BTreeSet::new(),
            last_read_channel_dates: HashMap::new(),
        }
    }

    /// Builder-style role assignment
    pub fn with_role(mut self, role_id: Snowflake) -> Self {
        self.role_ids.insert(role_id);
        self
    }

    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }

    /// When the user last read a channel, if ever
    pub fn last_read(&self, channel_id: Snowflake) -> Option<DateTime<Utc>> {
        self.last_read_channel_dates.get(&channel_id).copied()
    }

    pub fn mark_read(&mut self, channel_id: Snowflake, at: DateTime<Utc>) {
        self.last_read_channel_dates.insert(channel_id, at);
    }
}
