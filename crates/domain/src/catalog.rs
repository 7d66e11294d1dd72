//! Built-in role and permission names provisioned by the default seed plan.

use rolegate_core::AppError;

use crate::{AccessPolicy, AccessRule, PermissionName};

/// Administrative role name.
pub const ADMIN_ROLE: &str = "Admin";
/// Standard user role name.
pub const USER_ROLE: &str = "User";

/// Grants the administrative data view.
pub const VIEW_ADMIN_DATA: &str = "view_admin_data";
/// Grants the standard data view.
pub const VIEW_USER_DATA: &str = "view_user_data";

/// Payload returned to holders of [`VIEW_ADMIN_DATA`].
pub const ADMIN_DATA_LABEL: &str = "This is ADMIN data";
/// Payload returned to holders of [`VIEW_USER_DATA`].
pub const USER_DATA_LABEL: &str = "This is USER data";

/// Policy guarding the role-wise data view: admin check first, then user.
pub fn role_wise_data_policy() -> Result<AccessPolicy, AppError> {
    Ok(AccessPolicy::new(vec![
        AccessRule::new(PermissionName::new(VIEW_ADMIN_DATA)?, ADMIN_DATA_LABEL),
        AccessRule::new(PermissionName::new(VIEW_USER_DATA)?, USER_DATA_LABEL),
    ]))
}
