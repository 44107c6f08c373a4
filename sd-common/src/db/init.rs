//! Database initialization
//!
//! Opens (or creates) the shared SQLite file used by both the API server and
//! the daily worker, and creates the schema idempotently.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Busy timeout applied to every connection
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize database connection and create tables if needed
///
/// Connection failures are reported as [`Error::NotConfigured`]: without a
/// store neither binary can do anything useful.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::NotConfigured(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    // Pragmas live on the connect options so every pooled connection gets
    // them. WAL lets API readers proceed while the worker upserts.
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .map_err(|e| {
            Error::NotConfigured(format!("Cannot open {}: {}", db_path.display(), e))
        })?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent - safe to call multiple times)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_passages_table(pool).await?;
    create_daily_payloads_table(pool).await?;
    create_visitor_stats_table(pool).await?;
    Ok(())
}

/// Content store: one row per passage
async fn create_passages_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS passages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            source TEXT NOT NULL
                CHECK (source IN ('quran', 'torah', 'bible', 'human_design')),
            reference TEXT NOT NULL,
            text TEXT NOT NULL,
            topics TEXT NOT NULL CHECK (length(trim(topics)) > 0),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_passages_source ON passages(source)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Payload store: at most one row per date
async fn create_daily_payloads_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_payloads (
            date TEXT PRIMARY KEY,
            payload_json TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Single-row visitor counter
async fn create_visitor_stats_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS visitor_stats (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            count INTEGER NOT NULL DEFAULT 0,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("INSERT OR IGNORE INTO visitor_stats (id, count) VALUES (1, 0)")
        .execute(pool)
        .await?;

    Ok(())
}
