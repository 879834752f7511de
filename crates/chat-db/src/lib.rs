//! # chat-db
//!
//! Storage layer implementing the chat-core repository traits with
//! in-process record stores.
//!
//! ## Overview
//!
//! The persistent document store is an external collaborator. These
//! adapters keep the same record shapes in memory and honour the same
//! query semantics:
//!
//! - Point lookups and unordered scans over concurrent maps
//! - Ranged, ordered message scans per channel
//! - Tombstoned deletes that every read path filters out
//! - A single settings record replaced atomically
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_db::MemoryStore;
//! use chat_core::traits::RoleRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!     let roles = store.roles.find_all().await?;
//!     assert_eq!(roles.len(), 2); // _user and _everyone
//!     Ok(())
//! }
//! ```

pub mod repositories;
pub mod store;

// Re-export commonly used types
pub use repositories::{
    MemChannelRepository, MemMessageRepository, MemRoleRepository, MemSettingsRepository,
    MemUserRepository,
};
pub use store::MemoryStore;
