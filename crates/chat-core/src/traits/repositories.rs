//! Repository traits (ports) - define the interface for data access
//!
//! The record stores are external collaborators. The domain layer defines
//! the handful of operations the chat core needs from them (point lookup,
//! scan, ranged ordered scan, insert, count) and adapters provide the
//! implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Channel, Message, Role, ServerSettings, User};
use crate::error::DomainError;
use crate::value_objects::{MessageRange, RoleId, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Role Repository
// ============================================================================

#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Find role by ID (real or synthetic)
    async fn find_by_id(&self, id: RoleId) -> RepoResult<Option<Role>>;

    /// List every role record, synthetic ones included, in no particular order
    async fn find_all(&self) -> RepoResult<Vec<Role>>;

    /// Insert a new role
    async fn create(&self, role: &Role) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find every user whose ID is in `ids`; unknown IDs are skipped
    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Insert a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Replace an existing user record
    async fn update(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    /// Insert a new channel
    async fn create(&self, channel: &Channel) -> RepoResult<()>;

    /// Replace an existing channel record
    async fn update(&self, channel: &Channel) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Every read here sees live messages only; tombstoned records are invisible.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Find every message whose ID is in `ids`, in no particular order
    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<Message>>;

    /// Ranged ordered scan over one channel, see [`MessageRange`]
    async fn find_range(&self, channel_id: Snowflake, range: MessageRange)
        -> RepoResult<Vec<Message>>;

    /// Count messages created strictly after `since`, stopping at `cap`
    async fn count_after(
        &self,
        channel_id: Snowflake,
        since: DateTime<Utc>,
        cap: usize,
    ) -> RepoResult<usize>;

    /// Earliest message created strictly after `since`
    async fn first_after(
        &self,
        channel_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Option<Message>>;

    /// Insert a new message
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// Tombstone a message
    async fn delete(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Settings Repository
// ============================================================================

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Read the global settings record
    async fn get(&self) -> RepoResult<ServerSettings>;

    /// Replace the global settings record in a single write
    async fn set(&self, settings: &ServerSettings) -> RepoResult<()>;
}
