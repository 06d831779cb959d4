//! gRPC server application.
//!
//! Hosts the Envoy `Authorization/Check` callback and the demo
//! `TestService` on one listener, backed by the Postgres credential store.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod server;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::net::TcpListener;
use tracing::info;
use users::{DatabaseConfig, SeaOrmUserStore, UserStore};

use crate::config::AppConfig;

/// Bring the database up, then serve until `shutdown` resolves.
///
/// # Errors
///
/// Fails if the database is unreachable, a migration fails, the listener
/// cannot be bound, or the transport stops with an error.
pub async fn run<F>(config: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let db = users::connect(&config.database).await?;
    if config.database.migrate_on_start {
        users::upgrade_db(&db).await?;
    }

    let store: Arc<dyn UserStore> = Arc::new(SeaOrmUserStore::new(
        db.clone(),
        config.database.query_timeout,
    ));

    let listener = TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("failed to listen on {}", config.server.bind_addr))?;
    info!(addr = %listener.local_addr()?, "gRPC server listening");

    let served = server::serve(listener, store, config.auth, shutdown)
        .await
        .context("gRPC server error");
    info!("gRPC server stopped");

    let closed = db.close().await.context("close database pool");
    served.and(closed)
}

/// Apply pending migrations and return.
///
/// # Errors
///
/// Fails if the database is unreachable or a migration fails.
pub async fn migrate(config: &DatabaseConfig) -> anyhow::Result<()> {
    let db = users::connect(config).await?;
    users::upgrade_db(&db).await?;
    db.close().await.context("close database pool")?;
    Ok(())
}
