//! Channel entity - a named message stream with an ordered pin list

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Channel record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    /// Pinned messages, oldest pin first
    #[serde(default)]
    pub pinned_message_ids: Vec<Snowflake>,
}

impl Channel {
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            pinned_message_ids: Vec::new(),
        }
    }

    #[inline]
    pub fn is_pinned(&self, message_id: Snowflake) -> bool {
        self.pinned_message_ids.contains(&message_id)
    }

    /// Append to the pin list; false if it was already pinned
    pub fn pin(&mut self, message_id: Snowflake) -> bool {
        if self.is_pinned(message_id) {
            return false;
        }
        self.pinned_message_ids.push(message_id);
        true
    }

    /// Remove from the pin list, keeping the order of the rest; false if
    /// it was not pinned
    pub fn unpin(&mut self, message_id: Snowflake) -> bool {
        let before = self.pinned_message_ids.len();
        self.pinned_message_ids.retain(|id| *id != message_id);
        self.pinned_message_ids.len() != before
    }
}
