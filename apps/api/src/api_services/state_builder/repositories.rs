use std::sync::Arc;

use rolegate_application::{AuditRepository, AuthorizationRepository, SecurityAdminRepository};
use rolegate_core::AppError;
use rolegate_infrastructure::{
    InMemoryAuditRepository, InMemoryRbacRepository, PostgresAuditRepository,
    PostgresAuthorizationRepository, PostgresSecurityAdminRepository,
};
use sqlx::PgPool;
use tracing::info;

use crate::api_config::StoreBackend;
use crate::api_services::connect_and_migrate;

pub struct RepositorySet {
    pub security_admin_repository: Arc<dyn SecurityAdminRepository>,
    pub authorization_repository: Arc<dyn AuthorizationRepository>,
    pub audit_repository: Arc<dyn AuditRepository>,
}

impl RepositorySet {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            security_admin_repository: Arc::new(PostgresSecurityAdminRepository::new(
                pool.clone(),
            )),
            authorization_repository: Arc::new(PostgresAuthorizationRepository::new(pool.clone())),
            audit_repository: Arc::new(PostgresAuditRepository::new(pool.clone())),
        }
    }

    /// Both RBAC ports share one in-memory catalog.
    pub fn in_memory() -> Self {
        let rbac_repository = Arc::new(InMemoryRbacRepository::new());
        Self {
            security_admin_repository: rbac_repository.clone(),
            authorization_repository: rbac_repository,
            audit_repository: Arc::new(InMemoryAuditRepository::new()),
        }
    }
}

pub async fn build_repository_set(store: &StoreBackend) -> Result<RepositorySet, AppError> {
    match store {
        StoreBackend::Postgres { database_url } => {
            let pool = connect_and_migrate(database_url).await?;
            Ok(RepositorySet::postgres(&pool))
        }
        StoreBackend::Memory => {
            info!("using in-memory rbac store, state is lost on exit");
            Ok(RepositorySet::in_memory())
        }
    }
}
