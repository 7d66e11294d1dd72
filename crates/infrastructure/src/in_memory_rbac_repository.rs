use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use rolegate_application::{
    AuthorizationRepository, RoleDefinition, SecurityAdminRepository, permissions_not_found,
    role_not_found,
};
use rolegate_core::AppResult;
use rolegate_domain::{PermissionName, RoleName};


#[derive(Debug, Default)]
struct CatalogState {
    /// Roles in creation order with permission positions into `permissions`.
    roles: Vec<(RoleName, BTreeSet<usize>)>,
    role_positions: HashMap<RoleName, usize>,
    permissions: Vec<PermissionName>,
    permission_positions: HashMap<PermissionName, usize>,
    memberships: BTreeSet<(String, usize)>,
}

impl CatalogState {
    fn role_definition(&self, position: usize) -> Option<RoleDefinition> {
        self.roles.get(position).map(|(name, granted)| RoleDefinition {
            name: name.clone(),
            permissions: granted
                .iter()
                .filter_map(|index| self.permissions.get(*index).cloned())
                .collect(),
        })
    }
}

/// In-memory authorization store.
///
/// One lock guards the whole catalog, so every write is atomic with respect
/// to every read.
#[derive(Debug, Default)]
pub struct InMemoryRbacRepository {
    state: RwLock<CatalogState>,
}

impl InMemoryRbacRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecurityAdminRepository for InMemoryRbacRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        let state = self.state.read().await;
        Ok((0..state.roles.len())
            .filter_map(|position| state.role_definition(position))
            .collect())
    }

    async fn ensure_role(&self, name: &RoleName) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.role_positions.contains_key(name) {
            return Ok(false);
        }

        let position = state.roles.len();
        state.roles.push((name.clone(), BTreeSet::new()));
        state.role_positions.insert(name.clone(), position);
        Ok(true)
    }

    async fn ensure_permission(&self, name: &PermissionName) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.permission_positions.contains_key(name) {
            return Ok(false);
        }

        let position = state.permissions.len();
        state.permissions.push(name.clone());
        state.permission_positions.insert(name.clone(), position);
        Ok(true)
    }

    async fn sync_role_permissions(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition> {
        let mut state = self.state.write().await;
        let role_position = *state
            .role_positions
            .get(role)
            .ok_or_else(|| role_not_found(role))?;

        let mut resolved = BTreeSet::new();
        let mut missing = Vec::new();
        for permission in permissions {
            match state.permission_positions.get(permission) {
                Some(position) => {
                    resolved.insert(*position);
                }
                None => missing.push(permission),
            }
        }
        if !missing.is_empty() {
            return Err(permissions_not_found(missing));
        }

        if let Some((_, granted)) = state.roles.get_mut(role_position) {
            *granted = resolved;
        }

        state
            .role_definition(role_position)
            .ok_or_else(|| role_not_found(role))
    }

    async fn assign_role_to_subject(&self, subject: &str, role: &RoleName) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let role_position = *state
            .role_positions
            .get(role)
            .ok_or_else(|| role_not_found(role))?;

        Ok(state
            .memberships
            .insert((subject.to_owned(), role_position)))
    }
}

#[async_trait]
impl AuthorizationRepository for InMemoryRbacRepository {
    async fn list_roles_for_subject(&self, subject: &str) -> AppResult<Vec<RoleName>> {
        let state = self.state.read().await;
        Ok(state
            .memberships
            .iter()
            .filter(|(member, _)| member == subject)
            .filter_map(|(_, position)| state.roles.get(*position).map(|(name, _)| name.clone()))
            .collect())
    }

    async fn list_permissions_for_roles(
        &self,
        roles: &BTreeSet<RoleName>,
    ) -> AppResult<Vec<PermissionName>> {
        let state = self.state.read().await;
        let granted = roles
            .iter()
            .filter_map(|role| state.role_positions.get(role))
            .filter_map(|position| state.roles.get(*position))
            .flat_map(|(_, granted)| granted.iter().copied())
            .collect::<BTreeSet<_>>();

        Ok(granted
            .into_iter()
            .filter_map(|index| state.permissions.get(index).cloned())
            .collect())
    }
}
