//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_repository;
mod in_memory_rbac_repository;
mod postgres_audit_repository;
mod postgres_authorization_repository;
mod postgres_security_admin_repository;

pub use in_memory_audit_repository::{AuditLogRecord, InMemoryAuditRepository};
pub use in_memory_rbac_repository::InMemoryRbacRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_security_admin_repository::PostgresSecurityAdminRepository;
