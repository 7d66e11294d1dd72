use std::collections::BTreeSet;

use async_trait::async_trait;

use rolegate_core::AppResult;
use rolegate_domain::{PermissionName, RoleName};

use super::roles::RoleDefinition;

/// Repository port for role and assignment administration.
#[async_trait]
pub trait SecurityAdminRepository: Send + Sync {
    /// Lists every role with its assigned permissions in creation order.
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>>;

    /// Creates a role when no role with this name exists.
    ///
    /// Returns `true` when a role was created.
    async fn ensure_role(&self, name: &RoleName) -> AppResult<bool>;

    /// Creates a permission when no permission with this name exists.
    ///
    /// Returns `true` when a permission was created.
    async fn ensure_permission(&self, name: &PermissionName) -> AppResult<bool>;

    /// Replaces the role's permission set with exactly `permissions`.
    ///
    /// Fails with `NotFound` for an unknown role or for any unresolved
    /// permission, in which case the role's set is left untouched.
    async fn sync_role_permissions(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition>;

    /// Attaches an existing role to a subject.
    ///
    /// Returns `true` when the membership did not exist before.
    async fn assign_role_to_subject(&self, subject: &str, role: &RoleName) -> AppResult<bool>;
}

/// Repository port for authorization lookups.
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Lists the roles held by a subject.
    async fn list_roles_for_subject(&self, subject: &str) -> AppResult<Vec<RoleName>>;

    /// Lists the distinct permissions granted by any of `roles`.
    async fn list_permissions_for_roles(
        &self,
        roles: &BTreeSet<RoleName>,
    ) -> AppResult<Vec<PermissionName>>;
}
