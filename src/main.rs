//! country-atlas - REST backend for a countries browser
//!
//! This is the main entry point for the country-atlas API server.

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use country_atlas::auth::{AuthManager, TokenService};
use country_atlas::config::Config;
use country_atlas::database::SqliteDatabase;
use country_atlas::favorites::FavoritesService;
use country_atlas::ratelimit::{RateLimitConfig, RateLimiter};
use country_atlas::server::{AppState, Server};

/// country-atlas - REST backend for a countries browser
#[derive(Parser, Debug)]
#[command(name = "country-atlas")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "COUNTRY_ATLAS_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load and validate configuration
    let config = load_config(&args)?;
    config.validate()?;

    // Initialize tracing/logging
    init_tracing(&config.logging.level, &config.logging.format)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting country-atlas"
    );

    // Initialize database
    let database = SqliteDatabase::new(&config.database.path).await?;
    let database = Arc::new(database);
    info!(path = %config.database.path, "Database initialized");

    // Initialize token service from the process-wide signing secret
    let jwt_secret = config
        .auth
        .jwt_secret
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("auth.jwt_secret is required"))?;
    let tokens = TokenService::new(jwt_secret, config.auth.token_ttl_secs);

    // Initialize services
    let auth_manager = Arc::new(AuthManager::new(Arc::clone(&database), tokens));
    let favorites = Arc::new(FavoritesService::new(Arc::clone(&database)));
    let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig {
        max_requests: config.rate_limit.max_requests,
        window: std::time::Duration::from_secs(config.rate_limit.window_secs),
    }));
    info!(
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        "Rate limiter initialized"
    );

    // Create application state
    let state = AppState {
        auth_manager,
        favorites,
        rate_limiter,
    };

    // Create and start the HTTP server
    let server = Server::new(config.server.clone(), state);

    info!(
        host = %config.server.host,
        port = %config.server.port,
        "Starting HTTP server"
    );

    // Run the server
    let result = server.run(shutdown_signal()).await;

    info!("country-atlas shutdown complete");

    result.map_err(Into::into)
}

/// Load configuration from file or environment
fn load_config(args: &Args) -> anyhow::Result<Config> {
    match &args.config {
        Some(path) => {
            // Use eprintln! since tracing is not yet initialized
            eprintln!("Loading configuration from file: {}", path);
            Config::from_file(path).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
        }
        None => {
            // Use eprintln! since tracing is not yet initialized
            eprintln!("Loading configuration from environment variables");
            Config::from_env().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
        }
    }
}

/// Initialize the tracing subscriber with the configured level and format
fn init_tracing(log_level: &str, format: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    }

    Ok(())
}

/// Create a future that resolves when a shutdown signal is received
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
