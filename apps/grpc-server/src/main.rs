use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::signal;

#[derive(Parser, Debug)]
#[command(name = "tempo-grpc-server", version, about = "Envoy ext_authz and demo gRPC server")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Serve until interrupted (default).
    Run,
    /// Apply pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        grpc_server::config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let telemetry = tempo_telemetry::init(&config.telemetry).context("failed to init telemetry")?;

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => grpc_server::run(config, shutdown_signal()).await,
        Command::Migrate => grpc_server::migrate(&config.database).await,
    };

    if let Err(e) = result.as_ref() {
        tracing::error!(error = %format_args!("{e:#}"), "server exited with error");
    }
    if let Err(e) = telemetry.shutdown() {
        tracing::warn!(error = %e, "telemetry shutdown failed");
    }
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
