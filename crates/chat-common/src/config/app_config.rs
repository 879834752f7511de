//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! one is present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub snowflake: SnowflakeConfig,
    pub messaging: MessagingConfig,
    pub avatar: AvatarConfig,
    pub logging: LoggingConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(other.to_string()),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Message read-tracking configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    /// Unread counts stop at this many messages
    #[serde(default = "default_unread_count_cap")]
    pub unread_count_cap: usize,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            unread_count_cap: default_unread_count_cap(),
        }
    }
}

/// Avatar URL derivation
#[derive(Debug, Clone, Deserialize)]
pub struct AvatarConfig {
    #[serde(default = "default_avatar_base_url")]
    pub base_url: String,
    /// Fallback image style requested from the avatar service
    #[serde(default = "default_avatar_style")]
    pub default_style: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: default_avatar_base_url(),
            default_style: default_avatar_style(),
        }
    }
}

/// Log output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

// Default value functions
fn default_app_name() -> String {
    "chat-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_unread_count_cap() -> usize {
    200
}

fn default_avatar_base_url() -> String {
    "https://gravatar.com/avatar".to_string()
}

fn default_avatar_style() -> String {
    "retro".to_string()
}

/// Parse an optional variable, failing on values that are present but bad
fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw))
        })
        .transpose()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let worker_id: u16 = parse_var(&lookup, "WORKER_ID")?.unwrap_or(0);
        if worker_id > 1023 {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        let unread_count_cap: usize =
            parse_var(&lookup, "UNREAD_COUNT_CAP")?.unwrap_or_else(default_unread_count_cap);
        if unread_count_cap == 0 {
            return Err(ConfigError::InvalidValue("UNREAD_COUNT_CAP", "0".to_string()));
        }

        let env = match lookup("APP_ENV") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("APP_ENV", raw))?,
            None => default_env(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            snowflake: SnowflakeConfig { worker_id },
            messaging: MessagingConfig { unread_count_cap },
            avatar: AvatarConfig {
                base_url: lookup("AVATAR_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_avatar_base_url),
                default_style: lookup("AVATAR_DEFAULT_STYLE").unwrap_or_else(default_avatar_style),
            },
            logging: LoggingConfig {
                json: parse_var(&lookup, "LOG_JSON")?.unwrap_or(false),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
