//! Store interfaces and the SQLite implementation
//!
//! Components receive a store through these traits instead of reaching for a
//! global handle, so tests can swap in their own implementation.

use crate::db::models::{DailyPayload, NewPassage, PassageRef};
use crate::time::format_date_key;
use crate::tradition::Tradition;
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

/// Read access to the passage table
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Raw topic column of every stored passage (one entry per passage)
    async fn topic_columns(&self) -> Result<Vec<String>>;

    /// Passages of `tradition` whose topic list contains `topic` as a substring
    async fn passages_matching(&self, tradition: Tradition, topic: &str)
        -> Result<Vec<PassageRef>>;
}

/// Date-keyed payload persistence
#[async_trait]
pub trait PayloadStore: Send + Sync {
    /// Insert or replace the payload for `date` in one atomic statement
    async fn upsert(&self, date: NaiveDate, payload: &DailyPayload) -> Result<()>;

    /// Stored payload for `date`, or [`Error::NotFound`]
    ///
    /// Never generates content.
    async fn get_by_date(&self, date: NaiveDate) -> Result<DailyPayload>;
}

/// Page view counter shown on the landing page
#[async_trait]
pub trait VisitorCounter: Send + Sync {
    /// Increment and return the new count
    async fn increment(&self) -> Result<i64>;

    async fn count(&self) -> Result<i64>;
}

/// SQLite-backed store owning the connection pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn passage_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM passages")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert passages in a single transaction
    pub async fn insert_passages(&self, passages: &[NewPassage]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for passage in passages {
            let topics = passage.topics_column()?;
            sqlx::query(
                "INSERT INTO passages (source, reference, text, topics) VALUES (?, ?, ?, ?)",
            )
            .bind(passage.source.as_str())
            .bind(&passage.reference)
            .bind(&passage.text)
            .bind(topics)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn topic_columns(&self) -> Result<Vec<String>> {
        let topics: Vec<String> = sqlx::query_scalar("SELECT topics FROM passages")
            .fetch_all(&self.pool)
            .await?;
        Ok(topics)
    }

    async fn passages_matching(
        &self,
        tradition: Tradition,
        topic: &str,
    ) -> Result<Vec<PassageRef>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT reference, text FROM passages WHERE source = ? AND instr(topics, ?) > 0 ORDER BY id",
        )
        .bind(tradition.as_str())
        .bind(topic)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(reference, text)| PassageRef { reference, text })
            .collect())
    }
}

#[async_trait]
impl PayloadStore for SqliteStore {
    async fn upsert(&self, date: NaiveDate, payload: &DailyPayload) -> Result<()> {
        if payload.date != date {
            return Err(Error::InvalidInput(format!(
                "Payload dated {} cannot be stored under {}",
                payload.date, date
            )));
        }

        let json = serde_json::to_string(payload)?;
        let key = format_date_key(date);

        sqlx::query(
            r#"
            INSERT INTO daily_payloads (date, payload_json)
            VALUES (?, ?)
            ON CONFLICT(date) DO UPDATE SET
                payload_json = excluded.payload_json,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&key)
        .bind(json)
        .execute(&self.pool)
        .await?;

        debug!("Upserted payload for {}", key);
        Ok(())
    }

    async fn get_by_date(&self, date: NaiveDate) -> Result<DailyPayload> {
        let json: Option<String> =
            sqlx::query_scalar("SELECT payload_json FROM daily_payloads WHERE date = ?")
                .bind(format_date_key(date))
                .fetch_optional(&self.pool)
                .await?;

        let json = json.ok_or(Error::NotFound(date))?;

        serde_json::from_str(&json).map_err(|e| Error::CorruptPayload {
            date,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl VisitorCounter for SqliteStore {
    async fn increment(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO visitor_stats (id, count) VALUES (1, 1)
            ON CONFLICT(id) DO UPDATE SET
                count = count + 1,
                updated_at = CURRENT_TIMESTAMP
            RETURNING count
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count(&self) -> Result<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT count FROM visitor_stats WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(count.unwrap_or(0))
    }
}
