//! In-memory implementation of SettingsRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::instrument;

use chat_core::entities::ServerSettings;
use chat_core::traits::{RepoResult, SettingsRepository};

/// The single global settings record
#[derive(Debug, Default)]
pub struct MemSettingsRepository {
    settings: RwLock<ServerSettings>,
}

impl MemSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for MemSettingsRepository {
    #[instrument(skip(self))]
    async fn get(&self) -> RepoResult<ServerSettings> {
        Ok(self.settings.read().clone())
    }

    #[instrument(skip(self, settings))]
    async fn set(&self, settings: &ServerSettings) -> RepoResult<()> {
        *self.settings.write() = settings.clone();
        Ok(())
    }
}
