//! Rolegate API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod provisioning;
mod state;

use rolegate_core::AppError;
use tracing::info;

use crate::api_config::{ApiCommand, ApiConfig, StoreBackend, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{
    RepositorySet, build_app_state, build_repository_set, connect_and_migrate,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    if let (ApiCommand::Migrate, StoreBackend::Postgres { database_url }) =
        (&config.command, &config.store)
    {
        connect_and_migrate(database_url).await?;
        return Ok(());
    }

    let repositories: RepositorySet = build_repository_set(&config.store).await?;
    let app_state = build_app_state(&repositories, config.auth_subject_header.clone())?;

    match &config.command {
        ApiCommand::Seed => {
            provisioning::run_seed(&app_state.seed_service, &config.seed_memberships).await?;
            return Ok(());
        }
        ApiCommand::AssignRole { subject, role } => {
            provisioning::assign_role(&app_state.security_admin_service, subject, role).await?;
            return Ok(());
        }
        ApiCommand::Serve | ApiCommand::Migrate => {}
    }

    if config.seed_on_startup {
        provisioning::run_seed(&app_state.seed_service, &config.seed_memberships).await?;
    }

    let app = build_router(app_state);
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "rolegate-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
