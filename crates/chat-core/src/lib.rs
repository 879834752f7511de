//! # chat-core
//!
//! Domain layer containing entities, value objects, the message markup
//! lexer, and repository traits.
//! This crate has zero dependencies on infrastructure (storage, transport, etc.).

pub mod entities;
pub mod error;
pub mod markup;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Channel, Message, Role, ServerSettings, User};
pub use error::DomainError;
pub use traits::{
    ChannelRepository, MessageRepository, RepoResult, RoleRepository, SettingsRepository,
    UserRepository,
};
pub use value_objects::{
    is_name_valid, Actor, MessageCursor, MessageRange, PageRequest, PermissionKey, PermissionSet,
    RangeEnd, RoleId, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
