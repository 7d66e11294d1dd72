use axum::http::HeaderName;
use rolegate_core::AppError;

use crate::state::AppState;

mod repositories;
mod security;

pub use repositories::{RepositorySet, build_repository_set};

pub fn build_app_state(
    repositories: &RepositorySet,
    auth_subject_header: HeaderName,
) -> Result<AppState, AppError> {
    let security_services = security::build_security_services(repositories)?;

    Ok(AppState {
        security_admin_service: security_services.security_admin_service,
        role_wise_data_service: security_services.role_wise_data_service,
        seed_service: security_services.seed_service,
        auth_subject_header,
    })
}
