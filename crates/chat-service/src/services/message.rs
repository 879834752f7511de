//! Message service
//!
//! Handles message creation, deletion, paging, and unread tracking.

use chat_core::entities::{Message, User};
use chat_core::{MessageCursor, MessageRange, PageRequest, PermissionKey, Snowflake};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{CreateMessageRequest, CreatedMessage};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::mention::MentionService;
use super::permission::PermissionService;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a message and report who it mentions
    #[instrument(skip(self, request))]
    pub async fn create_message(
        &self,
        channel_id: Snowflake,
        author_id: Snowflake,
        request: CreateMessageRequest,
    ) -> ServiceResult<CreatedMessage> {
        request.validate()?;

        PermissionService::new(self.ctx)
            .require_permission(author_id, PermissionKey::SendMessages, Some(channel_id))
            .await?;

        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", channel_id))?;

        let message = Message::new(self.ctx.generate_id(), channel_id, author_id, request.text);
        self.ctx.message_repo().create(&message).await?;

        let mentions = MentionService::new(self.ctx)
            .get_mentions_from_message_content(&message.text)
            .await?;

        info!(
            message_id = %message.id,
            channel_id = %channel_id,
            mentions = mentions.len(),
            "Message created"
        );

        Ok(CreatedMessage { message, mentions })
    }

    /// Delete a message
    ///
    /// Authors may always delete their own messages; anyone else needs
    /// `deleteMessages`.
    #[instrument(skip(self))]
    pub async fn delete_message(
        &self,
        message_id: Snowflake,
        actor_user_id: Snowflake,
    ) -> ServiceResult<()> {
        let message = self.find_message(message_id).await?;

        if message.author_id != actor_user_id {
            PermissionService::new(self.ctx)
                .require_permission(
                    actor_user_id,
                    PermissionKey::DeleteMessages,
                    Some(message.channel_id),
                )
                .await?;
        }

        self.ctx.message_repo().delete(message_id, Utc::now()).await?;

        info!(message_id = %message_id, deleted_by = %actor_user_id, "Message deleted");

        Ok(())
    }

    /// One page of a channel's live messages, oldest first
    ///
    /// With only `after` set the page is the earliest messages following
    /// it. Otherwise it is the latest messages inside the bounds.
    #[instrument(skip(self))]
    pub async fn get_messages(
        &self,
        channel_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<Vec<Message>> {
        self.ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", channel_id))?;

        let after = match page.after {
            Some(id) => Some(self.resolve_cursor(channel_id, id).await?),
            None => None,
        };
        let before = match page.before {
            Some(id) => Some(self.resolve_cursor(channel_id, id).await?),
            None => None,
        };

        let range = MessageRange {
            after,
            before,
            from: page.range_end(),
            limit: page.effective_limit() as usize,
        };

        let messages = self.ctx.message_repo().find_range(channel_id, range).await?;

        debug!(channel_id = %channel_id, count = messages.len(), "Fetched message page");

        Ok(messages)
    }

    /// Live messages created after the user last read the channel, capped
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn get_unread_message_count(
        &self,
        user: &User,
        channel_id: Snowflake,
    ) -> ServiceResult<usize> {
        let count = self
            .ctx
            .message_repo()
            .count_after(channel_id, last_read(user, channel_id), self.ctx.unread_count_cap())
            .await?;
        Ok(count)
    }

    /// Earliest live message the user has not read yet
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn get_oldest_unread_message(
        &self,
        user: &User,
        channel_id: Snowflake,
    ) -> ServiceResult<Option<Message>> {
        let message = self
            .ctx
            .message_repo()
            .first_after(channel_id, last_read(user, channel_id))
            .await?;
        Ok(message)
    }

    /// Record that the user has read the channel up to now
    #[instrument(skip(self))]
    pub async fn mark_channel_read(
        &self,
        user_id: Snowflake,
        channel_id: Snowflake,
    ) -> ServiceResult<User> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        user.mark_read(channel_id, Utc::now());
        self.ctx.user_repo().update(&user).await?;

        debug!(user_id = %user_id, channel_id = %channel_id, "Channel marked read");

        Ok(user)
    }

    async fn find_message(&self, message_id: Snowflake) -> ServiceResult<Message> {
        self.ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id))
    }

    /// A page bound must be a live message of the same channel
    async fn resolve_cursor(
        &self,
        channel_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<MessageCursor> {
        match self.ctx.message_repo().find_by_id(message_id).await? {
            Some(message) if message.channel_id == channel_id => Ok(message.cursor()),
            _ => Err(ServiceError::not_found("Message", message_id)),
        }
    }
}

fn last_read(user: &User, channel_id: Snowflake) -> DateTime<Utc> {
    user.last_read(channel_id).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
