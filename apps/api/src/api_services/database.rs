use rolegate_core::AppError;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("../../crates/infrastructure/migrations");

/// Upper bound on open connections held by one API process.
const MAX_CONNECTIONS: u32 = 10;

/// Opens the rbac pool and brings its schema up to date.
pub async fn connect_and_migrate(database_url: &str) -> Result<PgPool, AppError> {
    let pool = connect_pool(database_url).await?;
    apply_migrations(&pool).await?;
    Ok(pool)
}

async fn connect_pool(database_url: &str) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to rbac database: {error}")))
}

async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await.map_err(|error| {
        AppError::Internal(format!("failed to apply rbac schema migrations: {error}"))
    })?;

    info!(
        known_migrations = MIGRATOR.iter().count(),
        "rbac schema is up to date"
    );
    Ok(())
}
