//! Permission service
//!
//! Resolves a user's effective permission set by overlaying the roles they
//! hold, least prioritized first, so the most prioritized role's explicit
//! value for a key always wins. `_user` and `_everyone` are always held and
//! always rank last.

use std::collections::HashMap;

use chat_core::entities::{Role, User};
use chat_core::{DomainError, PermissionKey, PermissionSet, RoleId, Snowflake};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Permission service for access control
///
/// `channel_id` parameters are accepted for channel-scoped overrides but
/// currently have no effect on the result.
pub struct PermissionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PermissionService<'a> {
    /// Create a new PermissionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All roles, most prioritized first, ending with `_user, _everyone`
    ///
    /// `override_order` previews a hypothetical order without persisting it.
    /// IDs in the order that no longer name a role are skipped.
    #[instrument(skip(self))]
    pub async fn get_prioritized_roles(
        &self,
        override_order: Option<&[Snowflake]>,
    ) -> ServiceResult<Vec<Role>> {
        let mut roles: HashMap<RoleId, Role> = self
            .ctx
            .role_repo()
            .find_all()
            .await?
            .into_iter()
            .map(|role| (role.id, role))
            .collect();

        let order = match override_order {
            Some(order) => order.to_vec(),
            None => {
                self.ctx
                    .settings_repo()
                    .get()
                    .await?
                    .role_prioritization_order
            }
        };

        let mut prioritized = Vec::with_capacity(order.len() + 2);
        for id in order {
            match roles.get(&RoleId::Custom(id)) {
                Some(role) => prioritized.push(role.clone()),
                None => warn!(role_id = %id, "Skipping unknown role in prioritization order"),
            }
        }

        for id in [RoleId::User, RoleId::Everyone] {
            prioritized.push(take_synthetic(&mut roles, id));
        }

        Ok(prioritized)
    }

    /// Effective permissions of a user
    #[instrument(skip(self))]
    pub async fn get_user_permissions(
        &self,
        user_id: Snowflake,
        channel_id: Option<Snowflake>,
        override_order: Option<&[Snowflake]>,
    ) -> ServiceResult<PermissionSet> {
        let user = self.find_user(user_id).await?;
        let roles = self.get_prioritized_roles(override_order).await?;

        let permissions = overlay(
            roles
                .iter()
                .filter(|role| role.id.custom().map_or(true, |id| user.has_role(id))),
        );

        debug!(
            user_id = %user_id,
            granted = ?permissions.granted(),
            "Computed user permissions"
        );

        Ok(permissions)
    }

    /// Permissions of an unauthenticated request: `_everyone` alone
    #[instrument(skip(self))]
    pub async fn get_everyone_permissions(&self) -> ServiceResult<PermissionSet> {
        let role = match self.ctx.role_repo().find_by_id(RoleId::Everyone).await? {
            Some(role) => role,
            None => {
                warn!("No _everyone role record, using defaults");
                Role::default_everyone()
            }
        };
        Ok(role.permissions)
    }

    /// True only if the resolved value of `key` is an explicit grant
    #[instrument(skip(self))]
    pub async fn user_has_permission(
        &self,
        user_id: Snowflake,
        key: PermissionKey,
        channel_id: Option<Snowflake>,
    ) -> ServiceResult<bool> {
        let permissions = self.get_user_permissions(user_id, channel_id, None).await?;
        Ok(permissions.allows(key))
    }

    /// All of `keys`, checked against one resolved permission set
    #[instrument(skip(self))]
    pub async fn user_has_permissions(
        &self,
        user_id: Snowflake,
        keys: &[PermissionKey],
        channel_id: Option<Snowflake>,
    ) -> ServiceResult<bool> {
        let permissions = self.get_user_permissions(user_id, channel_id, None).await?;
        Ok(permissions.allows_all(keys.iter().copied()))
    }

    /// Whether the user is granted every key the role defines
    ///
    /// Keys the role explicitly denies count as defined too.
    #[instrument(skip(self))]
    pub async fn user_has_permissions_of_role(
        &self,
        user_id: Snowflake,
        role_id: RoleId,
        channel_id: Option<Snowflake>,
    ) -> ServiceResult<bool> {
        let role = match self.ctx.role_repo().find_by_id(role_id).await? {
            Some(role) => role,
            None => Role::synthetic_default(role_id).ok_or(DomainError::RoleNotFound(role_id))?,
        };

        let permissions = self.get_user_permissions(user_id, channel_id, None).await?;
        Ok(permissions.allows_all(role.permissions.keys()))
    }

    /// The user's most prioritized real role, if they hold any
    #[instrument(skip(self))]
    pub async fn get_highest_role_of_user(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Option<Snowflake>> {
        let user = self.find_user(user_id).await?;
        if user.role_ids.is_empty() {
            return Ok(None);
        }

        let settings = self.ctx.settings_repo().get().await?;
        Ok(settings
            .role_prioritization_order
            .into_iter()
            .find(|id| user.has_role(*id)))
    }

    /// Fail with `PermissionDenied` unless `key` is granted
    #[instrument(skip(self))]
    pub async fn require_permission(
        &self,
        user_id: Snowflake,
        key: PermissionKey,
        channel_id: Option<Snowflake>,
    ) -> ServiceResult<()> {
        self.require_permissions(user_id, &[key], channel_id).await
    }

    /// Fail with `PermissionDenied` naming the first key not granted
    #[instrument(skip(self))]
    pub async fn require_permissions(
        &self,
        user_id: Snowflake,
        keys: &[PermissionKey],
        channel_id: Option<Snowflake>,
    ) -> ServiceResult<()> {
        let permissions = self.get_user_permissions(user_id, channel_id, None).await?;
        match permissions.first_missing(keys.iter().copied()) {
            Some(missing) => {
                debug!(user_id = %user_id, permission = %missing, "Permission denied");
                Err(ServiceError::permission_denied(missing))
            }
            None => Ok(()),
        }
    }

    async fn find_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }
}

/// Merge roles given most prioritized first
fn overlay<'r>(roles: impl DoubleEndedIterator<Item = &'r Role>) -> PermissionSet {
    roles.rev().fold(PermissionSet::new(), |mut acc, role| {
        acc.overlay(&role.permissions);
        acc
    })
}

fn take_synthetic(roles: &mut HashMap<RoleId, Role>, id: RoleId) -> Role {
    roles.remove(&id).unwrap_or_else(|| {
        warn!(role_id = %id, "Missing synthetic role record, using defaults");
        Role::synthetic_default(id).unwrap_or_else(|| Role {
            id,
            name: id.to_string(),
            permissions: PermissionSet::new(),
        })
    })
}
