//! Bundle of every in-memory repository

use std::sync::Arc;

use crate::repositories::{
    MemChannelRepository, MemMessageRepository, MemRoleRepository, MemSettingsRepository,
    MemUserRepository,
};

/// One fresh set of record stores
///
/// Handles are `Arc`s so they can be shared with a service context while
/// tests keep direct access for seeding.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    pub roles: Arc<MemRoleRepository>,
    pub users: Arc<MemUserRepository>,
    pub channels: Arc<MemChannelRepository>,
    pub messages: Arc<MemMessageRepository>,
    pub settings: Arc<MemSettingsRepository>,
}

impl MemoryStore {
    /// Empty stores apart from the two synthetic roles
    pub fn new() -> Self {
        Self::with_roles(MemRoleRepository::new())
    }

    /// Like [`MemoryStore::new`] but without any role records
    pub fn unseeded() -> Self {
        Self::with_roles(MemRoleRepository::empty())
    }

    fn with_roles(roles: MemRoleRepository) -> Self {
        Self {
            roles: Arc::new(roles),
            users: Arc::new(MemUserRepository::new()),
            channels: Arc::new(MemChannelRepository::new()),
            messages: Arc::new(MemMessageRepository::new()),
            settings: Arc::new(MemSettingsRepository::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
