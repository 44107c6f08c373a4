//! sd-worker - Scripture Daily batch job
//!
//! Generates the payload for one date (today by default), stores it and
//! exits. Any storage failure produces a non-zero exit status; there is no
//! internal retry, operators re-run the job.

use anyhow::{Context, Result};
use clap::Parser;
use sd_common::config::{Overrides, Settings};
use sd_common::time::parse_date_key;
use sd_common::{MissingPassagePolicy, SqliteStore};
use sd_worker::{run_once, RunOptions};
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line arguments for sd-worker
#[derive(Parser, Debug)]
#[command(name = "sd-worker")]
#[command(about = "Generate and store the Scripture Daily payload")]
#[command(version)]
struct Args {
    /// Config file (defaults to ~/.config/scripture-daily/config.toml)
    #[arg(short, long, env = "SD_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long, env = "SD_DATABASE_PATH")]
    database: Option<PathBuf>,

    /// Target date (YYYY-MM-DD); defaults to today in local time
    #[arg(long)]
    date: Option<String>,

    /// Fail instead of leaving a tradition empty when no passage matches
    #[arg(long)]
    strict: bool,

    /// Do not insert example passages into an empty content store
    #[arg(long)]
    skip_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(sd_common::logging::env_filter("info"))
        .init();

    info!(
        "Starting Scripture Daily worker (sd-worker) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let overrides = Overrides {
        config_file: args.config.clone(),
        database_path: args.database.clone(),
        ..Default::default()
    };
    let settings = Settings::resolve(&overrides).context("Failed to load configuration")?;

    let date = match &args.date {
        Some(key) => parse_date_key(key).context("Invalid --date")?,
        None => sd_common::time::today(),
    };

    let pool = sd_common::db::init_database(&settings.database_path)
        .await
        .context("Failed to open database")?;
    let store = SqliteStore::new(pool);

    let options = RunOptions {
        date,
        policy: if args.strict {
            MissingPassagePolicy::Strict
        } else {
            MissingPassagePolicy::Degrade
        },
        seed_content: !args.skip_seed,
    };

    let payload = run_once(&store, &options)
        .await
        .with_context(|| format!("Failed to generate payload for {}", date))?;

    if let Some(meta) = payload.meta.as_ref().filter(|m| !m.missing.is_empty()) {
        warn!("Payload stored with empty traditions: {:?}", meta.missing);
    }
    info!("[worker] stored payload for {} and exited", date);
    Ok(())
}
