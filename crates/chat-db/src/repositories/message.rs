//! In-memory implementation of MessageRepository

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use chat_core::entities::Message;
use chat_core::error::DomainError;
use chat_core::traits::{MessageRepository, RepoResult};
use chat_core::value_objects::{MessageCursor, MessageRange, RangeEnd, Snowflake};

use super::error::duplicate_key;

#[derive(Debug, Default)]
struct MessageLog {
    /// Per channel, messages in their total order
    channels: HashMap<Snowflake, BTreeMap<MessageCursor, Message>>,
    /// Message ID to (channel, position)
    index: HashMap<Snowflake, (Snowflake, MessageCursor)>,
}

impl MessageLog {
    fn get(&self, id: Snowflake) -> Option<&Message> {
        let (channel_id, cursor) = self.index.get(&id)?;
        self.channels.get(channel_id)?.get(cursor)
    }

    fn get_mut(&mut self, id: Snowflake) -> Option<&mut Message> {
        let (channel_id, cursor) = self.index.get(&id)?;
        self.channels.get_mut(channel_id)?.get_mut(cursor)
    }

    fn live_in(&self, channel_id: Snowflake) -> impl DoubleEndedIterator<Item = &Message> {
        self.channels
            .get(&channel_id)
            .into_iter()
            .flat_map(BTreeMap::values)
            .filter(|m| !m.is_deleted())
    }
}

/// Append-only message log, ordered per channel by [`MessageCursor`]
///
/// Deletes tombstone in place; no read ever returns a tombstoned message.
#[derive(Debug, Default)]
pub struct MemMessageRepository {
    log: RwLock<MessageLog>,
}

impl MemMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn live(message: &Message) -> Option<Message> {
    (!message.is_deleted()).then(|| message.clone())
}

#[async_trait]
impl MessageRepository for MemMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.log.read().get(id).and_then(live))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<Message>> {
        let log = self.log.read();
        Ok(ids
            .iter()
            .filter_map(|id| log.get(*id).and_then(live))
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_range(
        &self,
        channel_id: Snowflake,
        range: MessageRange,
    ) -> RepoResult<Vec<Message>> {
        if let (Some(after), Some(before)) = (range.after, range.before) {
            if after >= before {
                return Ok(Vec::new());
            }
        }

        let log = self.log.read();
        let Some(channel) = log.channels.get(&channel_id) else {
            return Ok(Vec::new());
        };

        let lower = range.after.map_or(Bound::Unbounded, Bound::Excluded);
        let upper = range.before.map_or(Bound::Unbounded, Bound::Excluded);
        let window = channel
            .range((lower, upper))
            .map(|(_, m)| m)
            .filter(|m| !m.is_deleted());

        let mut page: Vec<Message> = match range.from {
            RangeEnd::Earliest => window.take(range.limit).cloned().collect(),
            RangeEnd::Latest => window.rev().take(range.limit).cloned().collect(),
        };
        if range.from == RangeEnd::Latest {
            page.reverse();
        }
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn count_after(
        &self,
        channel_id: Snowflake,
        since: DateTime<Utc>,
        cap: usize,
    ) -> RepoResult<usize> {
        Ok(self
            .log
            .read()
            .live_in(channel_id)
            .filter(|m| m.date_created > since)
            .take(cap)
            .count())
    }

    #[instrument(skip(self))]
    async fn first_after(
        &self,
        channel_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Option<Message>> {
        Ok(self
            .log
            .read()
            .live_in(channel_id)
            .find(|m| m.date_created > since)
            .cloned())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let mut log = self.log.write();
        if log.index.contains_key(&message.id) {
            return Err(duplicate_key("message", message.id));
        }
        let cursor = message.cursor();
        log.index.insert(message.id, (message.channel_id, cursor));
        log.channels
            .entry(message.channel_id)
            .or_default()
            .insert(cursor, message.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let mut log = self.log.write();
        let message = log
            .get_mut(id)
            .filter(|m| !m.is_deleted())
            .ok_or(DomainError::MessageNotFound(id))?;
        message.tombstone(at);
        Ok(())
    }
}
