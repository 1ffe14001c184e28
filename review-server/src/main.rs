//! review-server - listening review collection service
//!
//! Startup sequence:
//! 1. Resolve configuration (CLI, env, TOML, defaults)
//! 2. Drop and recreate the schema (prior data is discarded)
//! 3. Seed the column directory with one immediate sync
//! 4. Start the weekly job scheduler and serve HTTP until shutdown

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use review_common::config::{ServiceConfig, TomlConfig};
use review_server::jobs::{JobContext, JobHistory, JobRegistry};
use review_server::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for review-server
#[derive(Parser, Debug)]
#[command(name = "review-server")]
#[command(about = "Listening review collection service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "REVIEW_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "REVIEW_HOST")]
    host: Option<String>,

    /// Root folder holding the data/ directory
    #[arg(short, long, env = "REVIEW_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Explicit TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "review_server=info,review_common=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting listening review service (review-server) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();
    let toml = TomlConfig::load_or_default(args.config.as_deref());
    let config = ServiceConfig::resolve(
        args.root_folder.as_deref(),
        args.host.as_deref(),
        args.port,
        &toml,
    );
    info!("Root folder: {}", config.root_folder.display());

    let paths = config.data_paths();
    paths
        .ensure_directory_exists()
        .context("Failed to create data directory")?;

    let db_path = paths.database_path();
    let pool = review_common::db::init_database(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    info!("Database ready: {}", db_path.display());

    let history = JobHistory::new();
    let ctx = JobContext::new(pool.clone(), paths.clone(), history.clone());

    // Seed the column directory before serving requests
    if !ctx.run_column_sync().await {
        warn!("Starting with an empty column directory");
    }

    let registry = JobRegistry::new(ctx, &config.sync_schedule, &config.export_schedule)
        .await
        .context("Failed to register scheduled jobs")?;
    registry
        .start()
        .await
        .context("Failed to start job scheduler")?;

    let state = AppState::new(pool.clone(), paths, history);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.host, config.port))?;
    info!("review-server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    registry
        .shutdown()
        .await
        .context("Failed to stop job scheduler")?;
    pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
