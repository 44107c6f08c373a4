//! Topic selection and passage resolution
//!
//! Randomness is sampled in application code over the candidate set read
//! from the store, so the distribution does not depend on the database.

use crate::db::models::{first_topic, PassageRef};
use crate::store::ContentStore;
use crate::tradition::Tradition;
use crate::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Topic used when the content store is empty or unreadable
pub const FALLBACK_TOPIC: &str = "generosity";

/// Pick the day's topic
///
/// One passage is drawn uniformly at random and the first label of its
/// topic list is taken, so topics carried by more passages are
/// proportionally more likely. Never fails: an empty or unreadable store
/// yields [`FALLBACK_TOPIC`].
pub async fn select_topic<S, R>(store: &S, rng: &mut R) -> String
where
    S: ContentStore + ?Sized,
    R: Rng,
{
    let columns = match store.topic_columns().await {
        Ok(columns) => columns,
        Err(e) => {
            warn!("Topic query failed, using fallback '{}': {}", FALLBACK_TOPIC, e);
            return FALLBACK_TOPIC.to_string();
        }
    };

    match columns.choose(rng).and_then(|c| first_topic(c)) {
        Some(topic) => {
            debug!("Selected topic '{}' from {} passages", topic, columns.len());
            topic.to_string()
        }
        None => {
            warn!("Content store has no topics, using fallback '{}'", FALLBACK_TOPIC);
            FALLBACK_TOPIC.to_string()
        }
    }
}

/// Pick one passage of `tradition` tagged with `topic`
///
/// Uniform over all matches; [`Error::NoMatch`] when there are none.
pub async fn resolve_passage<S, R>(
    store: &S,
    tradition: Tradition,
    topic: &str,
    rng: &mut R,
) -> Result<PassageRef>
where
    S: ContentStore + ?Sized,
    R: Rng,
{
    if topic.trim().is_empty() {
        return Err(Error::InvalidInput("Topic must not be empty".to_string()));
    }

    let mut candidates = store.passages_matching(tradition, topic).await?;
    if candidates.is_empty() {
        return Err(Error::NoMatch {
            tradition,
            topic: topic.to_string(),
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates.swap_remove(index))
}
