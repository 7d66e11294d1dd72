use rolegate_application::{
    SecurityAdminService, SeedMembership, SeedPlan, SeedReport, SeedService,
};
use rolegate_core::{AppError, UserIdentity};
use tracing::info;

/// Applies the built-in catalog plus configured memberships.
pub async fn run_seed(
    seed_service: &SeedService,
    memberships: &[SeedMembership],
) -> Result<SeedReport, AppError> {
    let plan = SeedPlan::default_catalog()?.with_memberships(memberships.to_vec());
    let report = seed_service.run(&UserIdentity::system(), &plan).await?;

    info!(
        roles_created = report.roles_created,
        permissions_created = report.permissions_created,
        memberships_created = report.memberships_created,
        "seed applied"
    );

    Ok(report)
}

pub async fn assign_role(
    security_admin_service: &SecurityAdminService,
    subject: &str,
    role: &str,
) -> Result<(), AppError> {
    let created = security_admin_service
        .assign_role_to_subject(&UserIdentity::system(), subject, role)
        .await?;

    if created {
        info!(subject, role, "role assigned");
    } else {
        info!(subject, role, "role already assigned");
    }

    Ok(())
}
