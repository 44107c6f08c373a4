//! sd-worker library - one-shot daily payload generation
//!
//! Select a topic, resolve one passage per tradition, upsert the payload for
//! the target date, exit. Re-running for the same date replaces the row.

use chrono::NaiveDate;
use sd_common::db::seed_example_passages;
use sd_common::{
    ContentStore, DailyPayload, MissingPassagePolicy, PayloadAssembler, PayloadStore, Result,
    SqliteStore,
};
use tracing::info;

/// Parameters of a single batch run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub date: NaiveDate,
    pub policy: MissingPassagePolicy,
    /// Insert example passages when the content store is empty
    pub seed_content: bool,
}

impl RunOptions {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            policy: MissingPassagePolicy::default(),
            seed_content: true,
        }
    }
}

/// Generate and store the payload for `options.date`
pub async fn run_once(store: &SqliteStore, options: &RunOptions) -> Result<DailyPayload> {
    let assembler = PayloadAssembler::new(store.clone()).policy(options.policy);
    run_with(store, assembler, options).await
}

/// Same as [`run_once`] with a caller-built assembler
///
/// The assembler's own policy applies; `options.policy` is not consulted.
pub async fn run_with<S: ContentStore>(
    store: &SqliteStore,
    mut assembler: PayloadAssembler<S>,
    options: &RunOptions,
) -> Result<DailyPayload> {
    if options.seed_content {
        seed_example_passages(store).await?;
    }

    let payload = assembler.assemble(options.date).await?;
    store.upsert(options.date, &payload).await?;

    info!(
        "Stored payload for {} (topic '{}')",
        sd_common::time::format_date_key(options.date),
        payload.topic
    );
    Ok(payload)
}
