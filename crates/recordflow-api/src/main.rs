//! recordflow CLI and webhook server entry point.
//!
//! Binary name: `recordflow`
//!
//! Parses CLI arguments, initializes tracing, then either validates a config
//! file or loads it and serves the webhook endpoint.

mod cli;
mod http;
mod state;

use std::path::Path;

use clap::Parser;

use cli::{Cli, Commands};
use recordflow_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_format, cli.log_directive(), cli.otel).map_err(|e| anyhow::anyhow!(e))?;

    let result = match &cli.command {
        Commands::Serve { config, host, port } => serve(config, host, *port, cli.quiet).await,
        Commands::Check { config } => cli::check::check_config(config, cli.json).await,
    };

    shutdown_tracing();
    result
}

/// Load the config, wire the pipeline and serve until a shutdown signal.
async fn serve(config_path: &Path, host: &str, port: u16, quiet: bool) -> anyhow::Result<()> {
    let state = AppState::init(config_path).await?;
    let pairs = state.webhook_handler.registry().len();

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, pairs, config = %config_path.display(), "webhook server listening");
    if !quiet {
        println!(
            "  {} recordflow listening on {} ({} pairs)",
            console::style("⚡").bold(),
            console::style(format!("http://{addr}")).cyan(),
            pairs
        );
        println!("  {}", console::style("Press Ctrl+C to stop").dim());
    }

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("webhook server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
