//! In-memory implementation of RoleRepository

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::instrument;

use chat_core::entities::Role;
use chat_core::traits::{RepoResult, RoleRepository};
use chat_core::value_objects::RoleId;

use super::error::duplicate_key;

/// Role records keyed by role ID
#[derive(Debug, Default)]
pub struct MemRoleRepository {
    roles: DashMap<RoleId, Role>,
}

impl MemRoleRepository {
    /// A store holding the two synthetic baseline roles
    pub fn new() -> Self {
        let repo = Self::empty();
        for role in [Role::default_user(), Role::default_everyone()] {
            repo.roles.insert(role.id, role);
        }
        repo
    }

    /// A store with no records at all, not even the synthetic roles
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overwrite a record in place, synthetic ones included
    pub fn put(&self, role: Role) {
        self.roles.insert(role.id, role);
    }
}

#[async_trait]
impl RoleRepository for MemRoleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RoleId) -> RepoResult<Option<Role>> {
        Ok(self.roles.get(&id).map(|r| r.value().clone()))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Role>> {
        Ok(self.roles.iter().map(|r| r.value().clone()).collect())
    }

    #[instrument(skip(self, role), fields(role_id = %role.id))]
    async fn create(&self, role: &Role) -> RepoResult<()> {
        match self.roles.entry(role.id) {
            Entry::Occupied(_) => Err(duplicate_key("role", role.id)),
            Entry::Vacant(slot) => {
                slot.insert(role.clone());
                Ok(())
            }
        }
    }
}
