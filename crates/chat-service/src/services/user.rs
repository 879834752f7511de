//! User service
//!
//! Handles user profile lookups.

use chat_core::entities::User;
use chat_core::Snowflake;
use tracing::instrument;

use crate::dto::UserProfile;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }

    /// Public profile of a user
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Snowflake) -> ServiceResult<UserProfile> {
        let user = self.get_user(user_id).await?;
        let avatar_url = self.ctx.avatar_urls().for_email(user.email.as_deref());
        Ok(UserProfile::new(user, avatar_url))
    }

    /// Avatar URL derived from the user's email
    #[instrument(skip(self))]
    pub async fn get_avatar_url(&self, user_id: Snowflake) -> ServiceResult<String> {
        let user = self.get_user(user_id).await?;
        Ok(self.ctx.avatar_urls().for_email(user.email.as_deref()))
    }
}
