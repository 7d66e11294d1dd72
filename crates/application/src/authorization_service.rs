use std::collections::BTreeSet;
use std::sync::Arc;

use rolegate_core::AppResult;
use rolegate_domain::{AccessPolicy, AccessRule, PermissionName, RoleName};

use crate::AuthorizationRepository;


/// Application service for authorization decisions.
///
/// Every decision works on an explicit role-set snapshot so callers never
/// depend on a framework user object.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }

    /// Returns the role set currently held by a subject.
    pub async fn roles_for_subject(&self, subject: &str) -> AppResult<BTreeSet<RoleName>> {
        Ok(self
            .repository
            .list_roles_for_subject(subject)
            .await?
            .into_iter()
            .collect())
    }

    /// Returns the union of the permission sets of `roles`.
    pub async fn effective_permissions(
        &self,
        roles: &BTreeSet<RoleName>,
    ) -> AppResult<BTreeSet<PermissionName>> {
        if roles.is_empty() {
            return Ok(BTreeSet::new());
        }

        Ok(self
            .repository
            .list_permissions_for_roles(roles)
            .await?
            .into_iter()
            .collect())
    }

    /// Returns whether at least one of `roles` is assigned `permission`.
    pub async fn user_has_permission(
        &self,
        roles: &BTreeSet<RoleName>,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        Ok(self
            .effective_permissions(roles)
            .await?
            .contains(permission))
    }

    /// Returns the first rule of `policy` granted to `roles`.
    ///
    /// The effective permission set is loaded once, so every rule is checked
    /// against the same snapshot.
    pub async fn evaluate_policy<'policy>(
        &self,
        roles: &BTreeSet<RoleName>,
        policy: &'policy AccessPolicy,
    ) -> AppResult<Option<&'policy AccessRule>> {
        let granted = self.effective_permissions(roles).await?;
        Ok(policy.evaluate(&granted))
    }
}
