//! Pool construction and the startup schema upgrade.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::info;

use super::migrations::Migrator;
use crate::config::DatabaseConfig;

/// Failures while bringing the database up. All of them are fatal to startup.
#[derive(Debug, Error)]
pub enum DbInitError {
    #[error("connect to database: {0}")]
    Connect(#[source] DbErr),

    #[error("upgrade db: {0}")]
    Migrate(#[source] DbErr),
}

/// Open the shared connection pool.
///
/// # Errors
///
/// Returns [`DbInitError::Connect`] if the DSN is invalid or the pool cannot
/// establish its initial connections.
pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbInitError> {
    let mut opts = ConnectOptions::new(cfg.dsn.expose_secret().to_owned());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .acquire_timeout(cfg.acquire_timeout)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.map_err(DbInitError::Connect)?;
    info!(
        max_connections = cfg.max_connections,
        backend = ?db.get_database_backend(),
        "Connected to database"
    );
    Ok(db)
}

/// Apply all pending migrations.
///
/// Reports "up to date" when nothing is pending; that is not an error.
///
/// # Errors
///
/// Returns [`DbInitError::Migrate`] if listing or applying migrations fails.
pub async fn upgrade_db(db: &DatabaseConnection) -> Result<(), DbInitError> {
    info!("applying database migrations...");

    let pending = Migrator::get_pending_migrations(db)
        .await
        .map_err(DbInitError::Migrate)?;
    if pending.is_empty() {
        info!("database is up to date");
        return Ok(());
    }

    Migrator::up(db, None).await.map_err(DbInitError::Migrate)?;
    info!(applied = pending.len(), "all migrations applied successfully");
    Ok(())
}
