//! Repository implementations
//!
//! In-memory implementations of the repository traits defined in chat-core.
//! Each repository owns the records of one domain entity.

mod channel;
mod error;
mod message;
mod role;
mod settings;
mod user;

pub use channel::MemChannelRepository;
pub use message::MemMessageRepository;
pub use role::MemRoleRepository;
pub use settings::MemSettingsRepository;
pub use user::MemUserRepository;
