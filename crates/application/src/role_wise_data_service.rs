use rolegate_core::{AppError, AppResult, UserIdentity};
use rolegate_domain::AccessPolicy;
use rolegate_domain::catalog::role_wise_data_policy;

use crate::AuthorizationService;

/// Serves the data view whose content depends on the caller's permissions.
#[derive(Clone)]
pub struct RoleWiseDataService {
    authorization_service: AuthorizationService,
    policy: AccessPolicy,
}

impl RoleWiseDataService {
    /// Creates the service with the built-in admin-then-user policy.
    pub fn new(authorization_service: AuthorizationService) -> AppResult<Self> {
        Ok(Self::with_policy(
            authorization_service,
            role_wise_data_policy()?,
        ))
    }

    /// Creates the service with a custom ordered policy.
    #[must_use]
    pub fn with_policy(authorization_service: AuthorizationService, policy: AccessPolicy) -> Self {
        Self {
            authorization_service,
            policy,
        }
    }

    /// Returns the label of the first policy rule granted to the caller.
    ///
    /// Fails with `Forbidden` when no rule matches.
    pub async fn resolve(&self, actor: &UserIdentity) -> AppResult<String> {
        let roles = self
            .authorization_service
            .roles_for_subject(actor.subject())
            .await?;

        match self
            .authorization_service
            .evaluate_policy(&roles, &self.policy)
            .await?
        {
            Some(rule) => Ok(rule.label().to_owned()),
            None => Err(AppError::Forbidden(format!(
                "subject '{}' holds none of the permissions required for role-wise data",
                actor.subject()
            ))),
        }
    }
}
