use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::{PermissionName, RoleName};

use crate::{
    AuditEvent, AuditRepository, AuthorizationRepository, RoleDefinition,
    SecurityAdminRepository, permissions_not_found, role_not_found,
};

pub(crate) fn role(value: &str) -> RoleName {
    match RoleName::new(value) {
        Ok(name) => name,
        Err(error) => panic!("invalid test role '{value}': {error}"),
    }
}

pub(crate) fn permission(value: &str) -> PermissionName {
    match PermissionName::new(value) {
        Ok(name) => name,
        Err(error) => panic!("invalid test permission '{value}': {error}"),
    }
}

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

/// Audit store that rejects every append.
pub(crate) struct FailingAuditRepository;

#[async_trait]
impl AuditRepository for FailingAuditRepository {
    async fn append_event(&self, _event: AuditEvent) -> AppResult<()> {
        Err(AppError::Internal("audit store unavailable".to_owned()))
    }
}

#[derive(Default)]
pub(crate) struct FakeRbacState {
    pub(crate) roles: Vec<(RoleName, Vec<PermissionName>)>,
    pub(crate) permissions: Vec<PermissionName>,
    pub(crate) memberships: Vec<(String, RoleName)>,
}

#[derive(Default)]
pub(crate) struct FakeRbacRepository {
    pub(crate) state: Mutex<FakeRbacState>,
    pub(crate) fail_reads: bool,
}

impl FakeRbacRepository {
    pub(crate) async fn snapshot(&self) -> Vec<(String, Vec<String>)> {
        self.state
            .lock()
            .await
            .roles
            .iter()
            .map(|(name, permissions)| {
                (
                    name.to_string(),
                    permissions.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }
}

#[async_trait]
impl SecurityAdminRepository for FakeRbacRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        if self.fail_reads {
            return Err(AppError::Internal("store unavailable".to_owned()));
        }

        Ok(self
            .state
            .lock()
            .await
            .roles
            .iter()
            .map(|(name, permissions)| RoleDefinition {
                name: name.clone(),
                permissions: permissions.clone(),
            })
            .collect())
    }

    async fn ensure_role(&self, name: &RoleName) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.roles.iter().any(|(existing, _)| existing == name) {
            return Ok(false);
        }

        state.roles.push((name.clone(), Vec::new()));
        Ok(true)
    }

    async fn ensure_permission(&self, name: &PermissionName) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.permissions.contains(name) {
            return Ok(false);
        }

        state.permissions.push(name.clone());
        Ok(true)
    }

    async fn sync_role_permissions(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition> {
        let mut state = self.state.lock().await;
        let missing = permissions
            .iter()
            .filter(|permission| !state.permissions.contains(permission))
            .collect::<Vec<_>>();
        let ordered = state
            .permissions
            .iter()
            .filter(|permission| permissions.contains(permission))
            .cloned()
            .collect::<Vec<_>>();

        let Some((_, assigned)) = state.roles.iter_mut().find(|(name, _)| name == role) else {
            return Err(role_not_found(role));
        };
        if !missing.is_empty() {
            return Err(permissions_not_found(missing));
        }

        assigned.clone_from(&ordered);
        Ok(RoleDefinition {
            name: role.clone(),
            permissions: ordered,
        })
    }

    async fn assign_role_to_subject(&self, subject: &str, role: &RoleName) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if !state.roles.iter().any(|(name, _)| name == role) {
            return Err(role_not_found(role));
        }
        if state
            .memberships
            .iter()
            .any(|(existing, name)| existing == subject && name == role)
        {
            return Ok(false);
        }

        state.memberships.push((subject.to_owned(), role.clone()));
        Ok(true)
    }
}

#[async_trait]
impl AuthorizationRepository for FakeRbacRepository {
    async fn list_roles_for_subject(&self, subject: &str) -> AppResult<Vec<RoleName>> {
        if self.fail_reads {
            return Err(AppError::Internal("store unavailable".to_owned()));
        }

        Ok(self
            .state
            .lock()
            .await
            .memberships
            .iter()
            .filter(|(existing, _)| existing == subject)
            .map(|(_, role)| role.clone())
            .collect())
    }

    async fn list_permissions_for_roles(
        &self,
        roles: &BTreeSet<RoleName>,
    ) -> AppResult<Vec<PermissionName>> {
        if self.fail_reads {
            return Err(AppError::Internal("store unavailable".to_owned()));
        }

        let state = self.state.lock().await;
        let granted = state
            .roles
            .iter()
            .filter(|(name, _)| roles.contains(name))
            .flat_map(|(_, permissions)| permissions.iter().cloned())
            .collect::<BTreeSet<_>>();

        Ok(granted.into_iter().collect())
    }
}
