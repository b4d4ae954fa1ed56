use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use stockroom_events::spawn_logging_subscriber;
use stockroom_server::api::{self, AppState};
use stockroom_server::config::StockroomConfig;
use stockroom_server::{factory, telemetry};

/// Stockroom product image HTTP server.
#[derive(Parser, Debug)]
#[command(name = "stockroom-server", about = "HTTP server for Stockroom product images")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "stockroom.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the metadata table for the configured backend, then exit.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = StockroomConfig::load(&cli.config)?;

    if let Some(Commands::Migrate) = cli.command {
        tracing_subscriber::fmt()
            .with_env_filter(telemetry::env_filter())
            .init();
        return run_migrate(&config).await;
    }

    // Must run before any tracing call so the first events are captured.
    let telemetry_guard = telemetry::init(&config.telemetry);

    if !Path::new(&cli.config).exists() {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    let (orchestrator, event_source) = factory::build_orchestrator(&config).await?;
    let orchestrator = Arc::new(orchestrator);

    let subscriber = match event_source {
        Some(source) if config.events.subscriber => Some(spawn_logging_subscriber(
            source,
            config.events.topic.clone(),
        )),
        _ => None,
    };

    let app = api::router(
        AppState::new(Arc::clone(&orchestrator)),
        config.server.max_upload_bytes,
    );

    let host = cli.host.as_deref().unwrap_or(&config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "stockroom-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = subscriber {
        handle.abort();
    }

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    if tokio::time::timeout(shutdown_timeout, orchestrator.shutdown())
        .await
        .is_err()
    {
        warn!(
            timeout_secs = config.server.shutdown_timeout_seconds,
            "shutdown timeout exceeded while closing stores"
        );
    }

    telemetry_guard.shutdown();

    info!("stockroom-server shut down");
    Ok(())
}

/// Run the `migrate` subcommand: open the metadata store, which creates its
/// table when missing, then close it.
async fn run_migrate(config: &StockroomConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(backend = %config.metadata.backend, "running metadata migrations...");
    let store = factory::create_metadata(&config.metadata).await?;
    store.close().await;
    info!(backend = %config.metadata.backend, "metadata migrations complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
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
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
