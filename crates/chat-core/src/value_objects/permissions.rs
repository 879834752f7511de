//! Permission keys and tri-state permission sets
//!
//! A role does not have to say anything about a key. Roles are layered in
//! priority order and only keys a role explicitly sets take part in the
//! overlay, so "unset" must stay distinguishable from "denied". A
//! [`PermissionSet`] therefore carries two masks: which keys are set, and
//! which of those are granted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// One bit per [`PermissionKey`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PermissionFlags: u16 {
        const READ_MESSAGES   = 1 << 0;
        const SEND_MESSAGES   = 1 << 1;
        const DELETE_MESSAGES = 1 << 2;
        const MANAGE_CHANNELS = 1 << 3;
        const MANAGE_PINS     = 1 << 4;
        const MANAGE_ROLES    = 1 << 5;
        const MANAGE_SERVER   = 1 << 6;
        const MANAGE_USERS    = 1 << 7;
    }
}

/// Every permission a role can speak about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionKey {
    /// Read messages in channels
    ReadMessages,
    /// Post new messages
    SendMessages,
    /// Delete messages written by other users
    DeleteMessages,
    /// Create, rename and delete channels
    ManageChannels,
    /// Pin and unpin messages
    ManagePins,
    /// Create roles and edit the role prioritization order
    ManageRoles,
    /// Edit server settings
    ManageServer,
    /// Assign roles to users
    ManageUsers,
}

impl PermissionKey {
    pub const ALL: [PermissionKey; 8] = [
        Self::ReadMessages,
        Self::SendMessages,
        Self::DeleteMessages,
        Self::ManageChannels,
        Self::ManagePins,
        Self::ManageRoles,
        Self::ManageServer,
        Self::ManageUsers,
    ];

    pub const fn flag(self) -> PermissionFlags {
        match self {
            Self::ReadMessages => PermissionFlags::READ_MESSAGES,
            Self::SendMessages => PermissionFlags::SEND_MESSAGES,
            Self::DeleteMessages => PermissionFlags::DELETE_MESSAGES,
            Self::ManageChannels => PermissionFlags::MANAGE_CHANNELS,
            Self::ManagePins => PermissionFlags::MANAGE_PINS,
            Self::ManageRoles => PermissionFlags::MANAGE_ROLES,
            Self::ManageServer => PermissionFlags::MANAGE_SERVER,
            Self::ManageUsers => PermissionFlags::MANAGE_USERS,
        }
    }

    /// Wire name, as used in persisted role records and error payloads
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadMessages => "readMessages",
            Self::SendMessages => "sendMessages",
            Self::DeleteMessages => "deleteMessages",
            Self::ManageChannels => "manageChannels",
            Self::ManagePins => "managePins",
            Self::ManageRoles => "manageRoles",
            Self::ManageServer => "manageServer",
            Self::ManageUsers => "manageUsers",
        }
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when a string names no known permission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission key: {0}")]
pub struct UnknownPermissionKey(pub String);

impl FromStr for PermissionKey {
    type Err = UnknownPermissionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownPermissionKey(s.to_string()))
    }
}

/// Tri-state mapping of permission key to granted / denied / unset
///
/// Serializes as the persisted `{ "permissionKey": bool }` object; unset
/// keys are simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<PermissionKey, bool>",
    into = "BTreeMap<PermissionKey, bool>"
)]
pub struct PermissionSet {
    set: PermissionFlags,
    granted: PermissionFlags,
}

impl PermissionSet {
    /// A set with no keys specified
    pub const fn new() -> Self {
        Self {
            set: PermissionFlags::empty(),
            granted: PermissionFlags::empty(),
        }
    }

    /// Builder-style [`PermissionSet::set`]
    pub fn with(mut self, key: PermissionKey, value: bool) -> Self {
        self.set(key, value);
        self
    }

    /// Explicitly grant or deny a key
    pub fn set(&mut self, key: PermissionKey, value: bool) {
        let flag = key.flag();
        self.set |= flag;
        self.granted.set(flag, value);
    }

    /// Forget any value for a key
    pub fn unset(&mut self, key: PermissionKey) {
        let flag = key.flag();
        self.set.remove(flag);
        self.granted.remove(flag);
    }

    /// `Some(value)` if the key is explicitly set, `None` otherwise
    pub fn get(&self, key: PermissionKey) -> Option<bool> {
        let flag = key.flag();
        self.set
            .contains(flag)
            .then_some(self.granted.contains(flag))
    }

    /// True only when the key is explicitly granted
    #[inline]
    pub fn allows(&self, key: PermissionKey) -> bool {
        self.granted.contains(key.flag())
    }

    /// True only when every key is explicitly granted
    pub fn allows_all<I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = PermissionKey>,
    {
        self.first_missing(keys).is_none()
    }

    /// First key (in iteration order) that is not explicitly granted
    pub fn first_missing<I>(&self, keys: I) -> Option<PermissionKey>
    where
        I: IntoIterator<Item = PermissionKey>,
    {
        keys.into_iter().find(|key| !self.allows(*key))
    }

    /// Lay `other` on top of `self`: every key `other` sets overwrites the
    /// value here, keys `other` leaves unset are untouched.
    pub fn overlay(&mut self, other: &PermissionSet) {
        self.granted = (self.granted & !other.set) | (other.granted & other.set);
        self.set |= other.set;
    }

    /// Keys explicitly set (granted or denied), in declaration order
    pub fn keys(&self) -> impl Iterator<Item = PermissionKey> + '_ {
        PermissionKey::ALL
            .into_iter()
            .filter(|key| self.set.contains(key.flag()))
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Mask of granted keys
    pub fn granted(&self) -> PermissionFlags {
        self.granted
    }
}

impl FromIterator<(PermissionKey, bool)> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = (PermissionKey, bool)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.set(key, value);
        }
        set
    }
}

impl From<BTreeMap<PermissionKey, bool>> for PermissionSet {
    fn from(map: BTreeMap<PermissionKey, bool>) -> Self {
        map.into_iter().collect()
    }
}

impl From<PermissionSet> for BTreeMap<PermissionKey, bool> {
    fn from(set: PermissionSet) -> Self {
        set.keys().map(|key| (key, set.allows(key))).collect()
    }
}
