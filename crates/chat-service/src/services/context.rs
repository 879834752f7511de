//! Service context - dependency container for services
//!
//! Holds all repositories and the few pieces of shared state services need.

use std::sync::Arc;

use chat_common::{AppConfig, AvatarUrls};
use chat_core::traits::{
    ChannelRepository, MessageRepository, RoleRepository, SettingsRepository, UserRepository,
};
use chat_core::SnowflakeGenerator;
use chat_db::MemoryStore;
use tokio::sync::{Mutex, MutexGuard};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Record store repositories
/// - Snowflake generator for ID generation
/// - The settings write lock
/// - Avatar URL derivation
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    message_repo: Arc<dyn MessageRepository>,
    role_repo: Arc<dyn RoleRepository>,
    settings_repo: Arc<dyn SettingsRepository>,

    // Shared state
    snowflake_generator: Arc<SnowflakeGenerator>,
    settings_lock: Arc<Mutex<()>>,
    avatar_urls: Arc<AvatarUrls>,

    // Configuration
    unread_count_cap: usize,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get the role repository
    pub fn role_repo(&self) -> &dyn RoleRepository {
        self.role_repo.as_ref()
    }

    /// Get the settings repository
    pub fn settings_repo(&self) -> &dyn SettingsRepository {
        self.settings_repo.as_ref()
    }

    // === Shared state ===

    /// Serialize a read-modify-write of the global settings record
    ///
    /// Every writer of the settings record (role ordering included) must
    /// hold this guard from its read until its write has completed.
    pub async fn lock_settings(&self) -> MutexGuard<'_, ()> {
        self.settings_lock.lock().await
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> chat_core::Snowflake {
        self.snowflake_generator.generate()
    }

    /// Get the avatar URL mapper
    pub fn avatar_urls(&self) -> &AvatarUrls {
        self.avatar_urls.as_ref()
    }

    /// Unread counts stop at this many messages
    pub fn unread_count_cap(&self) -> usize {
        self.unread_count_cap
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("unread_count_cap", &self.unread_count_cap)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    role_repo: Option<Arc<dyn RoleRepository>>,
    settings_repo: Option<Arc<dyn SettingsRepository>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    config: AppConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use every repository of an in-memory store
    pub fn store(self, store: MemoryStore) -> Self {
        self.user_repo(store.users)
            .channel_repo(store.channels)
            .message_repo(store.messages)
            .role_repo(store.roles)
            .settings_repo(store.settings)
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn RoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn settings_repo(mut self, repo: Arc<dyn SettingsRepository>) -> Self {
        self.settings_repo = Some(repo);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any repository is missing or the
    /// configured worker ID does not fit a snowflake
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T: ?Sized>(repo: Option<Arc<T>>, name: &str) -> ServiceResult<Arc<T>> {
            repo.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        let snowflake_generator = match self.snowflake_generator {
            Some(generator) => generator,
            None => {
                let worker_id = self.config.snowflake.worker_id;
                if worker_id > 1023 {
                    return Err(ServiceError::internal(format!(
                        "worker id {worker_id} does not fit in 10 bits"
                    )));
                }
                Arc::new(SnowflakeGenerator::new(worker_id))
            }
        };

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            channel_repo: required(self.channel_repo, "channel_repo")?,
            message_repo: required(self.message_repo, "message_repo")?,
            role_repo: required(self.role_repo, "role_repo")?,
            settings_repo: required(self.settings_repo, "settings_repo")?,
            snowflake_generator,
            settings_lock: Arc::new(Mutex::new(())),
            avatar_urls: Arc::new(AvatarUrls::new(self.config.avatar.clone())),
            unread_count_cap: self.config.messaging.unread_count_cap,
        })
    }
}
