//! Role service
//!
//! Creates roles and places them in the role prioritization order.

use chat_core::entities::Role;
use chat_core::{is_name_valid, Actor, PermissionKey, PermissionSet};
use tracing::{error, info, instrument};
use validator::Validate;

use crate::dto::CreateRoleRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate a client request and create the role on the actor's behalf
    ///
    /// Ordinary users need `manageRoles`; the system actor is trusted.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_role(&self, request: CreateRoleRequest, actor: Actor) -> ServiceResult<Role> {
        request.validate()?;
        if !is_name_valid(&request.name) {
            return Err(ServiceError::InvalidName(request.name));
        }

        if let Actor::User(user_id) = actor {
            PermissionService::new(self.ctx)
                .require_permission(user_id, PermissionKey::ManageRoles, None)
                .await?;
        }

        self.add_role(request.name, request.permissions, actor).await
    }

    /// Insert a role and place it in the prioritization order
    ///
    /// The system actor puts the role at the very front. A user actor puts it
    /// directly after their own highest role, or at the front if they hold
    /// no real role. The whole read-modify-write of the order runs under the
    /// settings lock, so concurrent additions never lose each other.
    #[instrument(skip(self, permissions))]
    pub async fn add_role(
        &self,
        name: String,
        permissions: PermissionSet,
        actor: Actor,
    ) -> ServiceResult<Role> {
        let actor_user = match actor {
            Actor::System => None,
            Actor::User(user_id) => Some(
                self.ctx
                    .user_repo()
                    .find_by_id(user_id)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::contract_violation(format!(
                            "role actor {user_id} is not a known user"
                        ))
                    })?,
            ),
        };

        let role_id = self.ctx.generate_id();
        let role = Role::new(role_id, name, permissions);

        let _guard = self.ctx.lock_settings().await;
        self.ctx.role_repo().create(&role).await?;

        let mut settings = self.ctx.settings_repo().get().await?;
        let order = &mut settings.role_prioritization_order;
        let index = match &actor_user {
            None => 0,
            Some(user) => order
                .iter()
                .position(|id| user.has_role(*id))
                .map_or(0, |highest| highest + 1),
        };
        order.insert(index, role_id);
        if let Err(e) = self.ctx.settings_repo().set(&settings).await {
            error!(
                role_id = %role_id,
                error = %e,
                "Role stored but left out of the prioritization order"
            );
            return Err(e.into());
        }

        info!(role_id = %role_id, position = index, actor = %actor, "Role created");

        Ok(role)
    }
}
