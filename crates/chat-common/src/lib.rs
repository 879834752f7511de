//! # chat-common
//!
//! Shared utilities including configuration, error handling, avatar URLs, and telemetry.

pub mod avatar;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use avatar::{hash_hex, AvatarUrls, HashError};
pub use config::{
    AppConfig, AppSettings, AvatarConfig, ConfigError, Environment, LoggingConfig,
    MessagingConfig, SnowflakeConfig,
};
pub use error::{AppError, AppResult, ErrorResponse};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_test_tracing, try_init_tracing,
    try_init_tracing_with_config, TracingConfig, TracingError,
};
