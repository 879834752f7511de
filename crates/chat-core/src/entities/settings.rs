//! Server settings - the single global configuration record

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// The global settings record
///
/// `role_prioritization_order` lists real roles only, most prioritized
/// first. It belongs to the permission subsystem and is rewritten only by
/// role management; `_user` and `_everyone` are implicitly appended last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    pub name: String,
    #[serde(default, rename = "iconURL")]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub role_prioritization_order: Vec<Snowflake>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "Unnamed chat server".to_string(),
            icon_url: None,
            role_prioritization_order: Vec::new(),
        }
    }
}
