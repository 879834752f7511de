//! Value objects - immutable types that represent domain concepts

mod actor;
mod name;
mod pagination;
mod permissions;
mod role_id;
mod snowflake;

pub use actor::Actor;
pub use name::is_name_valid;
pub use pagination::{
    MessageCursor, MessageRange, PageRequest, RangeEnd, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use permissions::{PermissionFlags, PermissionKey, PermissionSet, UnknownPermissionKey};
pub use role_id::RoleId;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
