use std::collections::BTreeSet;
use std::sync::Arc;

use rolegate_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use rolegate_domain::{AuditAction, PermissionName, RoleName};

use crate::{
    AssignPermissionsInput, AuditEvent, AuditRepository, RoleDefinition, SecurityAdminRepository,
    append_committed_event,
};


/// Application service for role administration workflows.
#[derive(Clone)]
pub struct SecurityAdminService {
    repository: Arc<dyn SecurityAdminRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SecurityAdminService {
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

    /// Returns every role with its current permissions.
    pub async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        self.repository.list_roles().await
    }

    /// Replaces a role's permission set and emits an audit event.
    pub async fn assign_permissions(
        &self,
        actor: &UserIdentity,
        input: AssignPermissionsInput,
    ) -> AppResult<RoleDefinition> {
        if input.permissions.is_empty() {
            return Err(AppError::Validation(
                "permissions must contain at least one permission name".to_owned(),
            ));
        }

        let role_name = RoleName::new(input.role_name.as_str())?;
        let permissions = input
            .permissions
            .iter()
            .map(PermissionName::new)
            .collect::<AppResult<BTreeSet<_>>>()?;

        let role = self
            .repository
            .sync_role_permissions(&role_name, &permissions)
            .await?;

        append_committed_event(
            self.audit_repository.as_ref(),
            AuditEvent {
                subject: actor.subject().to_owned(),
                action: AuditAction::SecurityRolePermissionsSynced,
                resource_type: "rbac_role".to_owned(),
                resource_id: role.name.to_string(),
                detail: Some(format!(
                    "set permissions of role '{}' to [{}]",
                    role.name,
                    joined(&role.permissions)
                )),
            },
        )
        .await;

        Ok(role)
    }

    /// Attaches a role to a subject and emits an audit event when it is new.
    pub async fn assign_role_to_subject(
        &self,
        actor: &UserIdentity,
        subject: &str,
        role_name: &str,
    ) -> AppResult<bool> {
        let subject = NonEmptyString::new(subject.trim())
            .map_err(|_| AppError::Validation("subject must not be empty".to_owned()))?;
        let role_name = RoleName::new(role_name)?;

        let created = self
            .repository
            .assign_role_to_subject(subject.as_str(), &role_name)
            .await?;

        if created {
            append_committed_event(
                self.audit_repository.as_ref(),
                AuditEvent {
                    subject: actor.subject().to_owned(),
                    action: AuditAction::SecuritySubjectRoleAssigned,
                    resource_type: "rbac_subject_role".to_owned(),
                    resource_id: format!("{}:{role_name}", subject.as_str()),
                    detail: Some(format!(
                        "assigned role '{role_name}' to '{}'",
                        subject.as_str()
                    )),
                },
            )
            .await;
        }

        Ok(created)
    }
}

fn joined(permissions: &[PermissionName]) -> String {
    permissions
        .iter()
        .map(PermissionName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
