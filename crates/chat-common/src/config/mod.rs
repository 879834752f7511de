//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, AvatarConfig, ConfigError, Environment, LoggingConfig,
    MessagingConfig, SnowflakeConfig,
};
