//! Pin service
//!
//! Maintains each channel's ordered list of pinned messages.

use std::collections::HashMap;

use chat_core::entities::Channel;
use chat_core::{DomainError, PermissionKey, Snowflake};
use tracing::{info, instrument};

use crate::dto::PinnedMessages;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Pin service
pub struct PinService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PinService<'a> {
    /// Create a new PinService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a message of this channel to its pin list
    #[instrument(skip(self))]
    pub async fn pin_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        actor_user_id: Snowflake,
    ) -> ServiceResult<Channel> {
        self.require_manage_pins(actor_user_id, channel_id).await?;

        let mut channel = self.find_channel(channel_id).await?;
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id))?;

        if message.channel_id != channel_id {
            return Err(DomainError::NotFromSameChannel {
                message: message_id,
                channel: channel_id,
            }
            .into());
        }
        if !channel.pin(message_id) {
            return Err(DomainError::AlreadyPinned(message_id).into());
        }

        self.ctx.channel_repo().update(&channel).await?;

        info!(channel_id = %channel_id, message_id = %message_id, "Message pinned");

        Ok(channel)
    }

    /// Remove a message from the pin list, keeping the others in order
    #[instrument(skip(self))]
    pub async fn unpin_message(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
        actor_user_id: Snowflake,
    ) -> ServiceResult<Channel> {
        self.require_manage_pins(actor_user_id, channel_id).await?;

        let mut channel = self.find_channel(channel_id).await?;
        if !channel.unpin(message_id) {
            return Err(DomainError::NotPinned(message_id).into());
        }

        self.ctx.channel_repo().update(&channel).await?;

        info!(channel_id = %channel_id, message_id = %message_id, "Message unpinned");

        Ok(channel)
    }

    /// Pinned live messages, oldest pin first
    #[instrument(skip(self))]
    pub async fn get_pins(&self, channel_id: Snowflake) -> ServiceResult<PinnedMessages> {
        let channel = self.find_channel(channel_id).await?;

        let mut live: HashMap<Snowflake, _> = self
            .ctx
            .message_repo()
            .find_many(&channel.pinned_message_ids)
            .await?
            .into_iter()
            .map(|message| (message.id, message))
            .collect();

        let messages = channel
            .pinned_message_ids
            .iter()
            .filter_map(|id| live.remove(id))
            .collect();

        Ok(PinnedMessages {
            channel_id,
            messages,
        })
    }

    async fn require_manage_pins(
        &self,
        user_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<()> {
        PermissionService::new(self.ctx)
            .require_permission(user_id, PermissionKey::ManagePins, Some(channel_id))
            .await
    }

    async fn find_channel(&self, channel_id: Snowflake) -> ServiceResult<Channel> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", channel_id))
    }
}
