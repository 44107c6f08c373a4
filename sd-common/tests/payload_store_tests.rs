//! Payload store write path and read path
//!
//! Covers last-write-wins upserts, NotFound for unwritten dates, corrupt
//! rows and the assemble → upsert → read round trip.

use chrono::NaiveDate;
use sd_common::db::{init_database, seed_example_passages};
use sd_common::{DailyPayload, Error, PassageRef, PayloadAssembler, PayloadStore, SqliteStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

/// Test helper: fresh database in a temp dir (kept alive by the returned guard)
async fn setup_store() -> (SqliteStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("scripture.db"))
        .await
        .expect("Should initialize test database");
    (SqliteStore::new(pool), dir)
}

fn date(s: &str) -> NaiveDate {
    sd_common::time::parse_date_key(s).unwrap()
}

fn payload(day: NaiveDate, topic: &str, tag: &str) -> DailyPayload {
    DailyPayload::new(
        day,
        topic,
        PassageRef::new(format!("Q {}", tag), "quran text"),
        PassageRef::new(format!("T {}", tag), "torah text"),
        PassageRef::new(format!("B {}", tag), "bible text"),
        PassageRef::new(format!("H {}", tag), "human design text"),
    )
}

async fn row_count(store: &SqliteStore, day: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM daily_payloads WHERE date = ?")
        .bind(day)
        .fetch_one(store.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_get_by_date_far_future_is_not_found() {
    let (store, _dir) = setup_store().await;

    let result = store.get_by_date(date("2099-12-31")).await;

    assert!(matches!(result, Err(Error::NotFound(d)) if d == date("2099-12-31")));
}

#[tokio::test]
async fn test_upsert_then_read() {
    let (store, _dir) = setup_store().await;
    let day = date("2025-03-14");
    let p = payload(day, "patience", "1");

    store.upsert(day, &p).await.unwrap();

    assert_eq!(store.get_by_date(day).await.unwrap(), p);
}

#[tokio::test]
async fn test_last_write_wins() {
    let (store, _dir) = setup_store().await;
    let day = date("2025-06-01");
    let p1 = payload(day, "patience", "first");
    let p2 = payload(day, "justice", "second");

    store.upsert(day, &p1).await.unwrap();
    store.upsert(day, &p2).await.unwrap();

    let stored = store.get_by_date(day).await.unwrap();
    assert_eq!(stored, p2);
    assert_eq!(row_count(&store, "2025-06-01").await, 1);
}

#[tokio::test]
async fn test_upsert_does_not_touch_other_dates() {
    let (store, _dir) = setup_store().await;
    let a = date("2025-06-01");
    let b = date("2025-06-02");

    store.upsert(a, &payload(a, "patience", "a")).await.unwrap();
    store.upsert(b, &payload(b, "justice", "b")).await.unwrap();
    store.upsert(a, &payload(a, "gratitude", "a2")).await.unwrap();

    assert_eq!(store.get_by_date(b).await.unwrap().topic, "justice");
    assert_eq!(store.get_by_date(a).await.unwrap().topic, "gratitude");
}

#[tokio::test]
async fn test_upsert_rejects_mismatched_date() {
    let (store, _dir) = setup_store().await;
    let p = payload(date("2025-01-01"), "patience", "x");

    let result = store.upsert(date("2025-01-02"), &p).await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(row_count(&store, "2025-01-02").await, 0);
}

#[tokio::test]
async fn test_corrupt_payload_is_reported() {
    let (store, _dir) = setup_store().await;

    sqlx::query("INSERT INTO daily_payloads (date, payload_json) VALUES ('2025-02-02', '{not json')")
        .execute(store.pool())
        .await
        .unwrap();

    let result = store.get_by_date(date("2025-02-02")).await;

    assert!(
        matches!(result, Err(Error::CorruptPayload { .. })),
        "got {:?}",
        result
    );
}

#[tokio::test]
async fn test_legacy_payload_without_meta_reads() {
    let (store, _dir) = setup_store().await;

    let legacy = r#"{"date":"2025-02-03","area":"gratitude",
        "quran":{"ref":"Ibrahim 14:7","text":"q"},
        "torah":{"ref":"Deuteronomy 8:10","text":"t"},
        "bible":{"ref":"1 Thessalonians 5:18","text":"b"},
        "human_design":{"ref":"Gate 19","text":"h"},
        "summary":"s"}"#;
    sqlx::query("INSERT INTO daily_payloads (date, payload_json) VALUES ('2025-02-03', ?)")
        .bind(legacy)
        .execute(store.pool())
        .await
        .unwrap();

    let stored = store.get_by_date(date("2025-02-03")).await.unwrap();
    assert_eq!(stored.topic, "gratitude");
    assert!(stored.meta.is_none());
}

#[tokio::test]
async fn test_assemble_upsert_read_round_trip() {
    let (store, _dir) = setup_store().await;
    seed_example_passages(&store).await.unwrap();
    let day = date("2025-01-01");

    let mut assembler = PayloadAssembler::with_rng(store.clone(), StdRng::seed_from_u64(7));
    let assembled = assembler.assemble(day).await.unwrap();
    store.upsert(day, &assembled).await.unwrap();

    let stored = store.get_by_date(day).await.unwrap();
    assert_eq!(stored.date, assembled.date);
    assert_eq!(stored.topic, assembled.topic);
    assert_eq!(stored.quran, assembled.quran);
    assert_eq!(stored.torah, assembled.torah);
    assert_eq!(stored.bible, assembled.bible);
    assert_eq!(stored.human_design, assembled.human_design);
    assert_eq!(stored.summary, assembled.summary);
}
