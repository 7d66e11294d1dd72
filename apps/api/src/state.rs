use axum::http::HeaderName;
use rolegate_application::{RoleWiseDataService, SecurityAdminService, SeedService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub security_admin_service: SecurityAdminService,
    pub role_wise_data_service: RoleWiseDataService,
    pub seed_service: SeedService,
    pub auth_subject_header: HeaderName,
}
