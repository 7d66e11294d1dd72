use rolegate_application::{permissions_not_found, role_not_found};
use tracing::debug;

use super::*;

impl PostgresSecurityAdminRepository {
    pub(super) async fn sync_role_permissions_impl(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(internal("failed to begin transaction"))?;

        // Row lock serializes concurrent replacements of the same role.
        let role_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM rbac_roles
            WHERE name = $1
            FOR UPDATE
            "#,
        )
        .bind(role.as_str())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(internal("failed to resolve role"))?
        .ok_or_else(|| role_not_found(role))?;

        let requested = permissions
            .iter()
            .map(|permission| permission.as_str().to_owned())
            .collect::<Vec<_>>();

        let resolved = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name
            FROM rbac_permissions
            WHERE name = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(requested)
        .fetch_all(&mut *transaction)
        .await
        .map_err(internal("failed to resolve permissions"))?;

        let missing = permissions
            .iter()
            .filter(|permission| !resolved.iter().any(|row| row.name == permission.as_str()))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(permissions_not_found(missing));
        }

        sqlx::query(
            r#"
            DELETE FROM rbac_role_permissions
            WHERE role_id = $1
            "#,
        )
        .bind(role_id)
        .execute(&mut *transaction)
        .await
        .map_err(internal("failed to clear role permissions"))?;

        let permission_ids = resolved.iter().map(|row| row.id).collect::<Vec<_>>();
        let permission_count = permission_ids.len();
        sqlx::query(
            r#"
            INSERT INTO rbac_role_permissions (role_id, permission_id)
            SELECT $1, permission_id
            FROM UNNEST($2::BIGINT[]) AS permission_id
            "#,
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(&mut *transaction)
        .await
        .map_err(internal("failed to persist role permissions"))?;

        transaction
            .commit()
            .await
            .map_err(internal("failed to commit transaction"))?;

        debug!(role = %role, permissions = permission_count, "role permissions replaced");

        Ok(RoleDefinition {
            name: role.clone(),
            permissions: resolved
                .iter()
                .map(|row| decode_permission_name(row.name.as_str()))
                .collect::<AppResult<Vec<_>>>()?,
        })
    }

    pub(super) async fn assign_role_to_subject_impl(
        &self,
        subject: &str,
        role: &RoleName,
    ) -> AppResult<bool> {
        let role_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM rbac_roles
            WHERE name = $1
            "#,
        )
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(internal("failed to resolve role"))?
        .ok_or_else(|| role_not_found(role))?;

        let rows_affected = sqlx::query(
            r#"
            INSERT INTO rbac_subject_roles (subject, role_id)
            VALUES ($1, $2)
            ON CONFLICT (subject, role_id) DO NOTHING
            "#,
        )
        .bind(subject)
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(internal("failed to assign role"))?
        .rows_affected();

        Ok(rows_affected == 1)
    }
}
