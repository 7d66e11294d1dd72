//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod role_wise_data_service;
mod security_admin_ports;
mod security_admin_service;
mod seed_service;

#[cfg(test)]
mod test_support;

pub use audit_ports::{AuditEvent, AuditRepository};
use audit_ports::append_committed_event;
pub use authorization_service::AuthorizationService;
pub use role_wise_data_service::RoleWiseDataService;
pub use security_admin_ports::{
    AssignPermissionsInput, AuthorizationRepository, RoleDefinition, SecurityAdminRepository,
    permissions_not_found, role_not_found,
};
pub use security_admin_service::SecurityAdminService;
pub use seed_service::{SeedMembership, SeedPlan, SeedReport, SeedRole, SeedService};
