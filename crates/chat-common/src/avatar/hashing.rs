//! Email-hash avatar URLs
//!
//! Avatars are served by a Gravatar-compatible service addressed by the
//! SHA-256 hex digest of the normalized email address.

use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::config::AvatarConfig;

/// Hashing helper misuse
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("hash input must be non-empty text")]
    EmptyInput,
}

/// Lowercase hex SHA-256 digest of `input`
///
/// # Errors
/// Fails on empty input rather than hashing it.
pub fn hash_hex(input: &str) -> Result<String, HashError> {
    if input.is_empty() {
        return Err(HashError::EmptyInput);
    }
    Ok(hex::encode(Sha256::digest(input.as_bytes())))
}

/// Memoizing email to avatar URL mapper
#[derive(Debug)]
pub struct AvatarUrls {
    config: AvatarConfig,
    cache: DashMap<String, String>,
}

impl AvatarUrls {
    pub fn new(config: AvatarConfig) -> Self {
        Self {
            config,
            cache: DashMap::new(),
        }
    }

    /// URL of the avatar for `email`; no email gives the default image
    pub fn for_email(&self, email: Option<&str>) -> String {
        let normalized = email.map(|e| e.trim().to_lowercase()).unwrap_or_default();
        if let Some(url) = self.cache.get(&normalized) {
            return url.clone();
        }

        let url = match hash_hex(&normalized) {
            Ok(digest) => format!(
                "{}/{}?d={}",
                self.config.base_url, digest, self.config.default_style
            ),
            Err(HashError::EmptyInput) => {
                format!("{}/?d={}", self.config.base_url, self.config.default_style)
            }
        };
        self.cache.insert(normalized, url.clone());
        url
    }

    /// Number of memoized URLs
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}
