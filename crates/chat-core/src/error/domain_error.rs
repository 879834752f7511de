//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{PermissionKey, RoleId, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Role not found: {0}")]
    RoleNotFound(RoleId),

    #[error("Message is not pinned: {0}")]
    NotPinned(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Missing permission: {0}")]
    MissingPermission(PermissionKey),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Message already pinned: {0}")]
    AlreadyPinned(Snowflake),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Message {message} does not belong to channel {channel}")]
    NotFromSameChannel { message: Snowflake, channel: Snowflake },

    #[error("Contract violation: {0}")]
    ContractViolation(String),

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_)
            | Self::ChannelNotFound(_)
            | Self::MessageNotFound(_)
            | Self::RoleNotFound(_)
            | Self::NotPinned(_) => "NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "INVALID_PARAMETER_TYPE",
            Self::InvalidName(_) => "INVALID_NAME",

            // Authorization
            Self::MissingPermission(_) => "NOT_ALLOWED",

            // Conflict
            Self::AlreadyPinned(_) => "ALREADY_PERFORMED",

            // Business Rules
            Self::NotFromSameChannel { .. } => "NOT_FROM_SAME_CHANNEL",
            Self::ContractViolation(_) => "CONTRACT_VIOLATION",

            // Infrastructure
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MessageNotFound(_)
                | Self::RoleNotFound(_)
                | Self::NotPinned(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidName(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPermission(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyPinned(_) | Self::NotFromSameChannel { .. })
    }

    /// Check if the caller broke an API contract (never retried)
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation(_))
    }
}
