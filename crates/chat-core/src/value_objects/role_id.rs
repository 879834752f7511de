//! Role identifiers, including the two synthetic baseline roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::snowflake::{Snowflake, SnowflakeParseError};

/// Identifier of a role record
///
/// `_user` and `_everyone` are never created through role management and
/// never appear in the prioritization order; they are implicitly the two
/// least-prioritized roles, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleId {
    /// Baseline for every authenticated user
    User,
    /// Baseline for every request, authenticated or not
    Everyone,
    /// A role created by an administrator
    Custom(Snowflake),
}

impl RoleId {
    pub const USER: &'static str = "_user";
    pub const EVERYONE: &'static str = "_everyone";

    #[inline]
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// The snowflake of a real role
    pub fn custom(&self) -> Option<Snowflake> {
        match self {
            Self::Custom(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<Snowflake> for RoleId {
    fn from(id: Snowflake) -> Self {
        Self::Custom(id)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str(Self::USER),
            Self::Everyone => f.write_str(Self::EVERYONE),
            Self::Custom(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for RoleId {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::USER => Ok(Self::User),
            Self::EVERYONE => Ok(Self::Everyone),
            other => other.parse().map(Self::Custom),
        }
    }
}

impl Serialize for RoleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
