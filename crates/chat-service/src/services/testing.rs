//! Shared fixtures for service unit tests

use chat_core::entities::{Channel, Message, Role, User};
use chat_core::traits::{ChannelRepository, MessageRepository, RoleRepository, SettingsRepository, UserRepository};
use chat_core::{PermissionKey, PermissionSet, Snowflake};
use chat_db::MemoryStore;
use chrono::{Duration, Utc};

use super::context::ServiceContext;

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub ctx: ServiceContext,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let ctx = ServiceContext::builder()
            .store(store.clone())
            .build()
            .expect("context");
        Self { store, ctx }
    }

    pub async fn user(&self, roles: &[Snowflake]) -> Snowflake {
        let id = self.ctx.generate_id();
        let mut user = User::new(id, format!("user{}", id.into_inner() % 10_000));
        user.role_ids.extend(roles.iter().copied());
        self.store.users.create(&user).await.expect("create user");
        id
    }

    /// Insert a role and append it to the prioritization order
    pub async fn role(&self, name: &str, grants: &[(PermissionKey, bool)]) -> Snowflake {
        let id = self.ctx.generate_id();
        let permissions: PermissionSet = grants.iter().copied().collect();
        self.store
            .roles
            .create(&Role::new(id, name, permissions))
            .await
            .expect("create role");
        let mut settings = self.store.settings.get().await.expect("settings");
        settings.role_prioritization_order.push(id);
        self.store.settings.set(&settings).await.expect("settings");
        id
    }

    pub async fn order(&self) -> Vec<Snowflake> {
        self.store
            .settings
            .get()
            .await
            .expect("settings")
            .role_prioritization_order
    }

    pub async fn channel(&self) -> Snowflake {
        let id = self.ctx.generate_id();
        self.store
            .channels
            .create(&Channel::new(id, "general"))
            .await
            .expect("create channel");
        id
    }

    /// Messages one second apart, oldest first
    pub async fn messages(&self, channel: Snowflake, author: Snowflake, count: usize) -> Vec<Message> {
        let start = Utc::now() - Duration::hours(1);
        let mut out = Vec::with_capacity(count);
        for n in 0..count {
            let mut message = Message::new(self.ctx.generate_id(), channel, author, format!("message {n}"));
            message.date_created = start + Duration::seconds(n as i64);
            self.store.messages.create(&message).await.expect("create message");
            out.push(message);
        }
        out
    }
}
