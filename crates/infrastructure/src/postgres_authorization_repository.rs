use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use rolegate_application::AuthorizationRepository;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{PermissionName, RoleName};

use crate::postgres_security_admin_repository::{decode_permission_name, decode_role_name};

/// PostgreSQL-backed repository for subject and role permission lookups.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NameRow {
    name: String,
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn list_roles_for_subject(&self, subject: &str) -> AppResult<Vec<RoleName>> {
        let rows = sqlx::query_as::<_, NameRow>(
            r#"
            SELECT roles.name
            FROM rbac_subject_roles AS subject_roles
            INNER JOIN rbac_roles AS roles
                ON roles.id = subject_roles.role_id
            WHERE subject_roles.subject = $1
            ORDER BY roles.id
            "#,
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load subject roles: {error}")))?;

        rows.iter()
            .map(|row| decode_role_name(row.name.as_str()))
            .collect()
    }

    async fn list_permissions_for_roles(
        &self,
        roles: &BTreeSet<RoleName>,
    ) -> AppResult<Vec<PermissionName>> {
        let role_names = roles
            .iter()
            .map(|role| role.as_str().to_owned())
            .collect::<Vec<_>>();

        let rows = sqlx::query_as::<_, NameRow>(
            r#"
            SELECT permissions.name
            FROM rbac_permissions AS permissions
            WHERE EXISTS (
                SELECT 1
                FROM rbac_role_permissions AS grants
                INNER JOIN rbac_roles AS roles
                    ON roles.id = grants.role_id
                WHERE grants.permission_id = permissions.id
                    AND roles.name = ANY($1)
            )
            ORDER BY permissions.id
            "#,
        )
        .bind(role_names)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load permissions: {error}")))?;

        rows.iter()
            .map(|row| decode_permission_name(row.name.as_str()))
            .collect()
    }
}
