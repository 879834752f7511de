//! Message entity - an immutable post in a channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{MessageCursor, Snowflake};

/// Message record
///
/// Text never changes after creation. Deletion leaves a tombstone
/// (`deleted_at`) that every read path filters out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author_id: Snowflake,
    pub text: String,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        author_id: Snowflake,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            channel_id,
            author_id,
            text: text.into(),
            date_created: Utc::now(),
            deleted_at: None,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Mark as deleted; the first tombstone wins
    pub fn tombstone(&mut self, at: DateTime<Utc>) {
        self.deleted_at.get_or_insert(at);
    }

    /// Position in the channel's total order
    #[inline]
    pub fn cursor(&self) -> MessageCursor {
        MessageCursor::new(self.date_created, self.id)
    }
}
