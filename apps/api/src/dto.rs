use rolegate_application::RoleDefinition;
use serde::{Deserialize, Serialize};

/// Incoming payload for a full replacement of a role's permissions.
#[derive(Debug, Deserialize)]
pub struct AssignPermissionsRequest {
    pub role: String,
    pub permissions: Vec<String>,
}

/// API representation of a role and its permissions.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub name: String,
    pub permissions: Vec<String>,
}

impl From<RoleDefinition> for RoleResponse {
    fn from(value: RoleDefinition) -> Self {
        Self {
            name: value.name.into(),
            permissions: value.permissions.into_iter().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Payload returned by the role-wise data view.
#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
