use rolegate_application::{
    AuthorizationService, RoleWiseDataService, SecurityAdminService, SeedService,
};
use rolegate_core::AppError;

use super::repositories::RepositorySet;

pub(super) struct SecurityServices {
    pub(super) security_admin_service: SecurityAdminService,
    pub(super) role_wise_data_service: RoleWiseDataService,
    pub(super) seed_service: SeedService,
}

pub(super) fn build_security_services(
    repositories: &RepositorySet,
) -> Result<SecurityServices, AppError> {
    let authorization_service =
        AuthorizationService::new(repositories.authorization_repository.clone());

    let security_admin_service = SecurityAdminService::new(
        repositories.security_admin_repository.clone(),
        repositories.audit_repository.clone(),
    );

    let seed_service = SeedService::new(
        repositories.security_admin_repository.clone(),
        repositories.audit_repository.clone(),
    );

    Ok(SecurityServices {
        security_admin_service,
        role_wise_data_service: RoleWiseDataService::new(authorization_service)?,
        seed_service,
    })
}
