use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use rolegate_application::{RoleDefinition, SecurityAdminRepository};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{PermissionName, RoleName};

mod assignments;
mod roles;

/// PostgreSQL-backed repository for role administration.
#[derive(Clone)]
pub struct PostgresSecurityAdminRepository {
    pool: PgPool,
}

impl PostgresSecurityAdminRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    role_name: String,
    permission_name: Option<String>,
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: i64,
    name: String,
}

#[async_trait]
impl SecurityAdminRepository for PostgresSecurityAdminRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        self.list_roles_impl().await
    }

    async fn ensure_role(&self, name: &RoleName) -> AppResult<bool> {
        self.ensure_role_impl(name).await
    }

    async fn ensure_permission(&self, name: &PermissionName) -> AppResult<bool> {
        self.ensure_permission_impl(name).await
    }

    async fn sync_role_permissions(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition> {
        self.sync_role_permissions_impl(role, permissions).await
    }

    async fn assign_role_to_subject(&self, subject: &str, role: &RoleName) -> AppResult<bool> {
        self.assign_role_to_subject_impl(subject, role).await
    }
}

/// Groups role rows ordered by role id into role definitions.
fn aggregate_roles(rows: Vec<RoleRow>) -> AppResult<Vec<RoleDefinition>> {
    let mut roles: Vec<RoleDefinition> = Vec::new();

    for row in rows {
        let is_same_role = roles
            .last()
            .is_some_and(|role| role.name.as_str() == row.role_name);
        if !is_same_role {
            roles.push(RoleDefinition {
                name: decode_role_name(row.role_name.as_str())?,
                permissions: Vec::new(),
            });
        }

        if let (Some(permission_value), Some(role)) = (row.permission_name, roles.last_mut()) {
            role.permissions
                .push(decode_permission_name(permission_value.as_str())?);
        }
    }

    Ok(roles)
}

pub(crate) fn decode_role_name(value: &str) -> AppResult<RoleName> {
    RoleName::new(value)
        .map_err(|error| AppError::Internal(format!("invalid stored role '{value}': {error}")))
}

pub(crate) fn decode_permission_name(value: &str) -> AppResult<PermissionName> {
    PermissionName::new(value).map_err(|error| {
        AppError::Internal(format!("invalid stored permission '{value}': {error}"))
    })
}

fn internal(context: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |error| AppError::Internal(format!("{context}: {error}"))
}
