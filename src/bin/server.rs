//! OpsDesk Mirror Server
//!
//! Stores one full-store snapshot per sync key and serves it back to any
//! console holding that key.
//!
//! # Configuration
//!
//! Environment variables:
//! - `OPSDESK_SERVER_PORT`: Port to listen on (default: 8787)
//! - `OPSDESK_SERVER_DB`: Path to the snapshot database
//!   (default: ~/.local/share/opsdesk-server/mirror.db)
//!
//! # Endpoints
//!
//! - `GET /api/sync?key=<syncKey>`: Fetch the snapshot for a key
//! - `POST /api/sync?key=<syncKey>`: Create or replace the snapshot
//! - `GET /health`: Health check endpoint

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opsdesk::server;

/// Server configuration
#[derive(Debug, Clone)]
struct Config {
    /// Port to listen on
    port: u16,
    /// Path to the snapshot database
    db_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let port = std::env::var("OPSDESK_SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8787);

        let db_path = std::env::var("OPSDESK_SERVER_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("opsdesk-server")
                    .join("mirror.db")
            });

        Self { port, db_path }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opsdesk_server=info,opsdesk=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Snapshot database: {}", config.db_path.display());

    let pool = match server::init_mirror_db(&config.db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to open snapshot database: {}", e);
            std::process::exit(1);
        }
    };

    let app = server::app(pool);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting mirror server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
