//! sd-api - Scripture Daily HTTP API server
//!
//! Long-lived, read-only view of the daily payloads written by sd-worker,
//! plus the subscription and email endpoints.

use anyhow::{Context, Result};
use clap::Parser;
use sd_api::email::LogMailer;
use sd_api::{build_router, AppState};
use sd_common::config::{Overrides, Settings};
use sd_common::SqliteStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments for sd-api
#[derive(Parser, Debug)]
#[command(name = "sd-api")]
#[command(about = "Scripture Daily HTTP API")]
#[command(version)]
struct Args {
    /// Config file (defaults to ~/.config/scripture-daily/config.toml)
    #[arg(short, long, env = "SD_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "SD_DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "SD_BIND_HOST")]
    host: Option<String>,

    /// Public site URL used in email links
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config.clone(),
            database_path: self.database.clone(),
            port: self.port,
            bind_host: self.host.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(sd_common::logging::env_filter("info,tower_http=debug"))
        .init();

    info!(
        "Starting Scripture Daily API (sd-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let settings = Settings::resolve(&args.overrides()).context("Failed to load configuration")?;
    info!("Database path: {}", settings.database_path.display());

    let pool = sd_common::db::init_database(&settings.database_path)
        .await
        .context("Failed to open database")?;

    if let Some(notice) = LogMailer::ignored_credentials_notice(&settings.email) {
        warn!("[email] {}", notice);
    }
    info!("[email] Emails will be logged only");
    let mailer = Arc::new(LogMailer::new(&settings.email));

    let state = AppState::new(SqliteStore::new(pool), mailer, settings.base_url.clone());
    let app = build_router(state);

    let addr = format!("{}:{}", settings.bind_host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("sd-api listening on http://{}", addr);

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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
