//! chromamix - color harmony and pigment mixing service
//!
//! Serves the color wheel, harmonies, lab mixing and recipe lookup over a
//! JSON HTTP API on port 5790 by default.

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chromamix::session::Session;
use chromamix::AppState;
use chromamix_common::config::{
    default_config_path, load_toml_config, RootFolderInitializer, RootFolderResolver, TomlConfig,
};
use chromamix_common::storage::SqliteStore;
use chromamix_common::KeyValueStore;
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for chromamix
#[derive(Parser, Debug)]
#[command(name = "chromamix")]
#[command(about = "Color harmony and pigment mixing service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides TOML `port`)
    #[arg(short, long, env = "CHROMAMIX_PORT")]
    port: Option<u16>,

    /// Folder holding the database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "CHROMAMIX_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config first: it carries the log level
    let config_path = args.config.clone().or_else(default_config_path);
    let toml_config = match &config_path {
        Some(path) => load_toml_config(path),
        None => TomlConfig::default(),
    };

    init_tracing(&toml_config)?;

    info!(
        "Starting chromamix v{} ({}, {} build, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("CHROMAMIX_GIT_HASH"),
        env!("CHROMAMIX_BUILD_PROFILE"),
        env!("CHROMAMIX_BUILD_TIMESTAMP")
    );
    match &config_path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config directory available, using defaults"),
    }

    // Root folder and database
    let root_folder = RootFolderResolver::new()
        .with_cli_override(args.root_folder.clone())
        .with_toml(&toml_config)
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());
    let store: Arc<dyn KeyValueStore> = Arc::new(
        SqliteStore::open(&db_path)
            .await
            .context("Failed to open database")?,
    );

    let recipes = chromamix::config::build_recipe_service(&toml_config, store.clone())
        .context("Failed to configure recipe service")?;
    let session = Session::load(Arc::new(recipes), store).await;
    let state = AppState::new(Arc::new(session));

    let app = chromamix::build_router(state);

    let port = args.port.unwrap_or_else(|| toml_config.port());
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over the TOML `logging.level`. With `logging.file` set,
/// logs are appended to that file instead of stderr.
fn init_tracing(config: &TomlConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "chromamix={level},chromamix_common={level},tower_http=info",
            level = config.logging.level
        ))
    });

    let (stderr_layer, file_layer) = match &config.logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (None, Some(layer))
        }
        None => (Some(tracing_subscriber::fmt::layer()), None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
