//! Cursor-based message pagination primitives

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::snowflake::Snowflake;

/// Page size used when none (or zero) is requested
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Hard upper bound on a page
pub const MAX_PAGE_SIZE: u32 = 50;

/// Position of a message in its channel's total order
///
/// Messages are ordered by `date_created`; messages created in the same
/// instant fall back to their (time-ordered) IDs, i.e. creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageCursor {
    pub date_created: DateTime<Utc>,
    pub id: Snowflake,
}

impl MessageCursor {
    pub fn new(date_created: DateTime<Utc>, id: Snowflake) -> Self {
        Self { date_created, id }
    }
}

/// Which end of a bounded range to take a page from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    /// Oldest messages first
    Earliest,
    /// Newest messages first
    Latest,
}

/// Ranged query handed to the message store
///
/// Both bounds are exclusive. The store returns at most `limit` live
/// messages, taken from `from` end, always in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRange {
    pub after: Option<MessageCursor>,
    pub before: Option<MessageCursor>,
    pub from: RangeEnd,
    pub limit: usize,
}

/// Page request as received from a client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Exclusive upper bound (message ID)
    #[serde(default)]
    pub before: Option<Snowflake>,
    /// Exclusive lower bound (message ID)
    #[serde(default)]
    pub after: Option<Snowflake>,
    /// Requested page size
    #[serde(default)]
    pub limit: Option<u32>,
}

impl PageRequest {
    pub fn latest() -> Self {
        Self::default()
    }

    pub fn before(mut self, id: Snowflake) -> Self {
        self.before = Some(id);
        self
    }

    pub fn after(mut self, id: Snowflake) -> Self {
        self.after = Some(id);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Page size actually served
    ///
    /// A requested limit of zero counts as "not given" and yields the
    /// default; anything else is clamped into `1..=MAX_PAGE_SIZE`.
    pub fn effective_limit(&self) -> u32 {
        match self.limit {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(n) => n.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Only `after` is bounded: page forward from a point
    pub fn is_forward(&self) -> bool {
        self.after.is_some() && self.before.is_none()
    }

    /// End of the bounded range the page is taken from
    pub fn range_end(&self) -> RangeEnd {
        if self.is_forward() {
            RangeEnd::Earliest
        } else {
            RangeEnd::Latest
        }
    }
}
