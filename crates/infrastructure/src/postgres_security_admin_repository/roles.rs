use super::*;

impl PostgresSecurityAdminRepository {
    pub(super) async fn list_roles_impl(&self) -> AppResult<Vec<RoleDefinition>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT
                roles.name AS role_name,
                permissions.name AS permission_name
            FROM rbac_roles AS roles
            LEFT JOIN rbac_role_permissions AS grants
                ON grants.role_id = roles.id
            LEFT JOIN rbac_permissions AS permissions
                ON permissions.id = grants.permission_id
            ORDER BY roles.id, permissions.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(internal("failed to list roles"))?;

        aggregate_roles(rows)
    }

    pub(super) async fn ensure_role_impl(&self, name: &RoleName) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO rbac_roles (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name.as_str())
        .execute(&self.pool)
        .await
        .map_err(internal("failed to create role"))?
        .rows_affected();

        Ok(rows_affected == 1)
    }

    pub(super) async fn ensure_permission_impl(&self, name: &PermissionName) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            r#"
            INSERT INTO rbac_permissions (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name.as_str())
        .execute(&self.pool)
        .await
        .map_err(internal("failed to create permission"))?
        .rows_affected();

        Ok(rows_affected == 1)
    }
}
