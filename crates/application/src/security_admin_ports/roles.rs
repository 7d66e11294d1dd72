use rolegate_core::AppError;
use rolegate_domain::{PermissionName, RoleName};

/// Role definition returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDefinition {
    /// Unique role name.
    pub name: RoleName,
    /// Assigned permissions in permission creation order.
    pub permissions: Vec<PermissionName>,
}

/// Input payload for replacing a role's permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignPermissionsInput {
    /// Name of an existing role.
    pub role_name: String,
    /// Names of existing permissions. Must not be empty.
    pub permissions: Vec<String>,
}

/// Error reported when a role lookup by exact name fails.
#[must_use]
pub fn role_not_found(role: &RoleName) -> AppError {
    AppError::NotFound(format!("role '{role}' was not found"))
}

/// Error reported when one or more permission names do not resolve.
#[must_use]
pub fn permissions_not_found<'a>(missing: impl IntoIterator<Item = &'a PermissionName>) -> AppError {
    let names = missing
        .into_iter()
        .map(|permission| format!("'{permission}'"))
        .collect::<Vec<_>>()
        .join(", ");

    AppError::NotFound(format!("permissions were not found: {names}"))
}
