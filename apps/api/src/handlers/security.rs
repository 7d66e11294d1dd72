use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use rolegate_application::AssignPermissionsInput;
use rolegate_core::UserIdentity;
use tracing::info;

use crate::dto::{AssignPermissionsRequest, MessageResponse, RoleResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(_user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .security_admin_service
        .list_roles()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn assign_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    payload: Result<Json<AssignPermissionsRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(payload) = payload?;
    let role = state
        .security_admin_service
        .assign_permissions(
            &user,
            AssignPermissionsInput {
                role_name: payload.role,
                permissions: payload.permissions,
            },
        )
        .await?;

    info!(
        subject = user.subject(),
        role = %role.name,
        permissions = role.permissions.len(),
        "permissions assigned"
    );

    Ok(Json(MessageResponse {
        message: "Permissions assigned successfully",
    }))
}
