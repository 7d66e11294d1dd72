use std::collections::BTreeSet;
use std::sync::Arc;

use rolegate_core::{AppResult, UserIdentity};
use rolegate_domain::catalog::{ADMIN_ROLE, USER_ROLE, VIEW_ADMIN_DATA, VIEW_USER_DATA};
use rolegate_domain::{AuditAction, PermissionName, RoleName};

use crate::{AuditEvent, AuditRepository, SecurityAdminRepository, append_committed_event};


/// One role of a seed plan with its complete permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRole {
    /// Role created when absent.
    pub name: RoleName,
    /// Exact permission set applied to the role.
    pub permissions: Vec<PermissionName>,
}

/// One subject membership of a seed plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedMembership {
    /// Subject receiving the role.
    pub subject: String,
    /// Role attached to the subject.
    pub role: RoleName,
}

/// Declarative catalog applied by [`SeedService::run`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedPlan {
    /// Roles in creation order.
    pub roles: Vec<SeedRole>,
    /// Memberships attached after the roles exist.
    pub memberships: Vec<SeedMembership>,
}

impl SeedPlan {
    /// Returns the built-in catalog: `Admin` holds both data views, `User`
    /// holds only the standard view.
    pub fn default_catalog() -> AppResult<Self> {
        let view_admin_data = PermissionName::new(VIEW_ADMIN_DATA)?;
        let view_user_data = PermissionName::new(VIEW_USER_DATA)?;

        Ok(Self {
            roles: vec![
                SeedRole {
                    name: RoleName::new(ADMIN_ROLE)?,
                    permissions: vec![view_admin_data, view_user_data.clone()],
                },
                SeedRole {
                    name: RoleName::new(USER_ROLE)?,
                    permissions: vec![view_user_data],
                },
            ],
            memberships: Vec::new(),
        })
    }

    /// Appends subject memberships to the plan.
    #[must_use]
    pub fn with_memberships(mut self, memberships: Vec<SeedMembership>) -> Self {
        self.memberships.extend(memberships);
        self
    }

    /// Returns every permission referenced by the plan, first-seen order.
    fn permissions(&self) -> Vec<&PermissionName> {
        let mut seen = BTreeSet::new();
        self.roles
            .iter()
            .flat_map(|role| role.permissions.iter())
            .filter(|permission| seen.insert(*permission))
            .collect()
    }
}

/// Counts of records created by one seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Roles that did not exist before.
    pub roles_created: usize,
    /// Permissions that did not exist before.
    pub permissions_created: usize,
    /// Subject memberships that did not exist before.
    pub memberships_created: usize,
}

/// Idempotent bootstrap of the role and permission catalog.
#[derive(Clone)]
pub struct SeedService {
    repository: Arc<dyn SecurityAdminRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SeedService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        repository: Arc<dyn SecurityAdminRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            audit_repository,
        }
    }

    /// Applies `plan`: create missing roles and permissions, replace each
    /// role's permission set, then attach memberships.
    ///
    /// Running the same plan again leaves the catalog unchanged.
    pub async fn run(&self, actor: &UserIdentity, plan: &SeedPlan) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        for role in &plan.roles {
            if self.repository.ensure_role(&role.name).await? {
                report.roles_created += 1;
            }
        }

        for permission in plan.permissions() {
            if self.repository.ensure_permission(permission).await? {
                report.permissions_created += 1;
            }
        }

        for role in &plan.roles {
            let permissions = role.permissions.iter().cloned().collect::<BTreeSet<_>>();
            self.repository
                .sync_role_permissions(&role.name, &permissions)
                .await?;
        }

        for membership in &plan.memberships {
            if self
                .repository
                .assign_role_to_subject(membership.subject.as_str(), &membership.role)
                .await?
            {
                report.memberships_created += 1;
            }
        }

        append_committed_event(
            self.audit_repository.as_ref(),
            AuditEvent {
                subject: actor.subject().to_owned(),
                action: AuditAction::SecurityCatalogSeeded,
                resource_type: "rbac_catalog".to_owned(),
                resource_id: "seed".to_owned(),
                detail: Some(format!(
                    "applied seed plan with {} roles (created roles={}, permissions={}, memberships={})",
                    plan.roles.len(),
                    report.roles_created,
                    report.permissions_created,
                    report.memberships_created
                )),
            },
        )
        .await;

        Ok(report)
    }
}
