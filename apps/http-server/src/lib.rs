//! Header-echo HTTP upstream.
//!
//! Sits behind the proxy so the headers added by the authorization check
//! (`x-user-info`) and the propagated trace context can be inspected.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod routes;

use std::future::Future;

use anyhow::Context as _;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;

/// Serve the router until `shutdown` resolves.
///
/// # Errors
///
/// Fails if the listener cannot be bound or the server stops with an error.
pub async fn run<F>(config: &ServerConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to listen on {}", config.bind_addr))?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, routes::router(config))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}
