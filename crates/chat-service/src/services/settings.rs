//! Settings service
//!
//! Reads and edits the global server settings record.

use chat_core::entities::ServerSettings;
use chat_core::{PermissionKey, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::UpdateSettingsRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::permission::PermissionService;

/// Settings service
pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingsService<'a> {
    /// Create a new SettingsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the current settings
    #[instrument(skip(self))]
    pub async fn get_settings(&self) -> ServiceResult<ServerSettings> {
        Ok(self.ctx.settings_repo().get().await?)
    }

    /// Update name and icon; requires `manageServer`
    ///
    /// The role prioritization order is carried over untouched.
    #[instrument(skip(self, request))]
    pub async fn update_settings(
        &self,
        actor_user_id: Snowflake,
        request: UpdateSettingsRequest,
    ) -> ServiceResult<ServerSettings> {
        request.validate()?;

        PermissionService::new(self.ctx)
            .require_permission(actor_user_id, PermissionKey::ManageServer, None)
            .await?;

        let _guard = self.ctx.lock_settings().await;
        let mut settings = self.ctx.settings_repo().get().await?;

        if let Some(name) = request.name {
            settings.name = name;
        }
        if let Some(icon_url) = request.icon_url {
            settings.icon_url = Some(icon_url);
        }

        self.ctx.settings_repo().set(&settings).await?;

        info!(updated_by = %actor_user_id, name = %settings.name, "Server settings updated");

        Ok(settings)
    }
}
