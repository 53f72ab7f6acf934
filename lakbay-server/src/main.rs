//! lakbay-server - travel quiz backend
//!
//! Serves the quiz, recommendations, and per-destination content
//! enrichment (photos and descriptions) over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lakbay_common::config::{load_or_default, RootFolderInitializer, RootFolderResolver};
use lakbay_common::db::{init_database_pool, SqliteSettingsStore};
use lakbay_common::KeyValueStore;
use lakbay_server::config::{resolve_gemini_api_key, resolve_unsplash_access_key, TomlConfigSource};
use lakbay_server::services::{GeminiClient, ImageCache, ImageProxy, UnsplashClient, WikipediaClient};
use lakbay_server::{AppState, Providers};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for lakbay-server
#[derive(Parser, Debug)]
#[command(name = "lakbay-server")]
#[command(about = "Travel quiz and destination content service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "LAKBAY_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1", env = "LAKBAY_BIND")]
    bind: std::net::IpAddr,

    /// Root folder holding the database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config =
        load_or_default(args.config.as_deref()).context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| toml_config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting lakbay-server v{} (git {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE"),
    );

    // Root folder and database
    let root_folder = RootFolderResolver::new(args.root_folder, Some(&toml_config)).resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());
    let pool = init_database_pool(&db_path)
        .await
        .context("Failed to open database")?;
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteSettingsStore::new(pool));

    // Providers
    let unsplash_key = resolve_unsplash_access_key(store.as_ref(), &toml_config).await?;
    let gemini_key = resolve_gemini_api_key(store.as_ref(), &toml_config).await?;

    let providers = Providers {
        photos: Arc::new(UnsplashClient::new(unsplash_key).context("Failed to build Unsplash client")?),
        gemini: Arc::new(GeminiClient::new(gemini_key).context("Failed to build Gemini client")?),
        wikipedia: Arc::new(WikipediaClient::new().context("Failed to build Wikipedia client")?),
        config: Arc::new(TomlConfigSource::new(toml_config.features.clone())),
    };

    let cache = ImageCache::new(
        toml_config.image_cache.capacity,
        std::time::Duration::from_secs(toml_config.image_cache.ttl_secs),
    );
    let images = ImageProxy::new(cache).context("Failed to build image proxy")?;

    let state = AppState::new(store, providers, images, &toml_config.rate_limit);
    let app = lakbay_server::build_router(state);

    let port = args.port.unwrap_or(toml_config.port);
    let addr = SocketAddr::new(args.bind, port);

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
            Ok(mut stream) => {
                stream.recv().await;
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
