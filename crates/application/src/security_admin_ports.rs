mod repositories;
mod roles;

pub use repositories::{AuthorizationRepository, SecurityAdminRepository};
pub use roles::{
    AssignPermissionsInput, RoleDefinition, permissions_not_found, role_not_found,
};
