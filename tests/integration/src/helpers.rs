//! Test helpers for integration tests
//!
//! [`TestChat`] owns an in-memory store and a service context built over it,
//! plus shortcuts for seeding records directly into the store.

use anyhow::{anyhow, Result};
use chat_common::{try_init_test_tracing, AppConfig};
use chat_core::entities::{Channel, Message, User};
use chat_core::traits::{ChannelRepository, MessageRepository, SettingsRepository, UserRepository};
use chat_core::{Actor, PermissionSet, Snowflake};
use chat_db::MemoryStore;
use chat_service::{RoleService, ServiceContext, ServiceError, ServiceResult};
use chrono::{DateTime, Duration, Utc};

/// A chat server wired to a fresh in-memory store
pub struct TestChat {
    pub store: MemoryStore,
    pub ctx: ServiceContext,
}

impl TestChat {
    /// Start with the default configuration
    pub fn start() -> Result<Self> {
        Self::start_with_config(AppConfig::default())
    }

    /// Start with a custom configuration
    pub fn start_with_config(config: AppConfig) -> Result<Self> {
        try_init_test_tracing();

        let store = MemoryStore::new();
        let ctx = ServiceContext::builder()
            .store(store.clone())
            .config(config)
            .build()
            .map_err(|e| anyhow!("failed to build service context: {e}"))?;

        Ok(Self { store, ctx })
    }

    /// Insert a user holding `roles`
    pub async fn user(&self, roles: &[Snowflake]) -> Result<Snowflake> {
        let id = self.ctx.generate_id();
        let mut user = User::new(id, crate::fixtures::unique_username());
        user.role_ids.extend(roles.iter().copied());
        self.store.users.create(&user).await?;
        Ok(id)
    }

    /// Load a user record
    pub async fn load_user(&self, id: Snowflake) -> Result<User> {
        self.store
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| anyhow!("user {id} not found"))
    }

    /// Insert a channel
    pub async fn channel(&self) -> Result<Snowflake> {
        let id = self.ctx.generate_id();
        let name = format!("test-channel-{}", crate::fixtures::unique_suffix());
        self.store.channels.create(&Channel::new(id, name)).await?;
        Ok(id)
    }

    /// Create a role through role management as the system actor
    pub async fn system_role(&self, permissions: PermissionSet) -> Result<Snowflake> {
        let role = RoleService::new(&self.ctx)
            .create_role(crate::fixtures::role_request(permissions), Actor::System)
            .await?;
        role.id
            .custom()
            .ok_or_else(|| anyhow!("created role has a synthetic id"))
    }

    /// Insert `count` messages one second apart, ending at `last`
    pub async fn backfill(
        &self,
        channel: Snowflake,
        author: Snowflake,
        count: usize,
        last: DateTime<Utc>,
    ) -> Result<Vec<Snowflake>> {
        let mut ids = Vec::with_capacity(count);
        for n in 0..count {
            let mut message =
                Message::new(self.ctx.generate_id(), channel, author, format!("backfill {n}"));
            message.date_created = last - Duration::seconds((count - 1 - n) as i64);
            self.store.messages.create(&message).await?;
            ids.push(message.id);
        }
        Ok(ids)
    }

    /// The persisted role prioritization order
    pub async fn role_order(&self) -> Result<Vec<Snowflake>> {
        Ok(self.store.settings.get().await?.role_prioritization_order)
    }
}

/// Assert that a service call failed with the given wire code
pub fn assert_error_code<T: std::fmt::Debug>(result: ServiceResult<T>, code: &str) -> ServiceError {
    match result {
        Ok(value) => panic!("expected {code}, got Ok({value:?})"),
        Err(err) => {
            assert_eq!(err.error_code(), code, "unexpected error: {err}");
            err
        }
    }
}

/// IDs of a list of messages
pub fn ids(messages: &[Message]) -> Vec<Snowflake> {
    messages.iter().map(|m| m.id).collect()
}
