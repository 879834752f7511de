//! Who is performing a mutation

use std::fmt;

use super::snowflake::Snowflake;

/// The party on whose behalf an operation runs
///
/// `System` is out-of-band administrative provisioning (the command-line
/// tooling that bootstraps the first admin role). It has no user identity
/// and therefore no highest role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    User(Snowflake),
    System,
}

impl From<Snowflake> for Actor {
    fn from(id: Snowflake) -> Self {
        Self::User(id)
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "user:{id}"),
            Self::System => f.write_str("system"),
        }
    }
}
