//! In-memory implementation of ChannelRepository

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use chat_core::entities::Channel;
use chat_core::error::DomainError;
use chat_core::traits::{ChannelRepository, RepoResult};
use chat_core::value_objects::Snowflake;

use super::error::duplicate_key;

/// Channel records keyed by channel ID
#[derive(Debug, Default)]
pub struct MemChannelRepository {
    channels: DashMap<Snowflake, Channel>,
}

impl MemChannelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelRepository for MemChannelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        Ok(self.channels.get(&id).map(|c| c.value().clone()))
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn create(&self, channel: &Channel) -> RepoResult<()> {
        match self.channels.entry(channel.id) {
            Entry::Occupied(_) => Err(duplicate_key("channel", channel.id)),
            Entry::Vacant(slot) => {
                slot.insert(channel.clone());
                Ok(())
            }
        }
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn update(&self, channel: &Channel) -> RepoResult<()> {
        let mut existing = self
            .channels
            .get_mut(&channel.id)
            .ok_or(DomainError::ChannelNotFound(channel.id))?;
        *existing = channel.clone();
        Ok(())
    }
}
