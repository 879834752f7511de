//! Error handling utilities for repositories

use std::fmt::Display;

use chat_core::error::DomainError;

/// Insert of a record whose key is already taken
pub fn duplicate_key(kind: &str, id: impl Display) -> DomainError {
    DomainError::StorageError(format!("duplicate {kind} id {id}"))
}
