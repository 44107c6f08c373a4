//! Daily payload assembly
//!
//! One topic selection followed by one passage resolution per tradition.
//! Assembly is not deterministic; inject a seeded RNG to reproduce a run.

use crate::db::models::{DailyPayload, PassageRef, PayloadMeta};
use crate::selection::{resolve_passage, select_topic};
use crate::store::ContentStore;
use crate::tradition::Tradition;
use crate::{time, Error, Result};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

/// What to do when a tradition has no passage for the day's topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingPassagePolicy {
    /// Leave the tradition's reference and text empty and record it in
    /// `meta.missing`
    #[default]
    Degrade,
    /// Fail the whole assembly
    Strict,
}

/// Builds a [`DailyPayload`] from a content store
pub struct PayloadAssembler<S> {
    store: S,
    rng: StdRng,
    policy: MissingPassagePolicy,
}

impl<S: ContentStore> PayloadAssembler<S> {
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    pub fn with_rng(store: S, rng: StdRng) -> Self {
        Self {
            store,
            rng,
            policy: MissingPassagePolicy::default(),
        }
    }

    pub fn policy(mut self, policy: MissingPassagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Assemble the payload for `date`
    ///
    /// Storage failures always propagate. [`Error::NoMatch`] is handled
    /// according to the configured [`MissingPassagePolicy`].
    pub async fn assemble(&mut self, date: NaiveDate) -> Result<DailyPayload> {
        let topic = select_topic(&self.store, &mut self.rng).await;
        info!("Assembling payload for {} with topic '{}'", date, topic);

        let mut resolved: [PassageRef; 4] = Default::default();
        let mut missing = Vec::new();

        for (slot, tradition) in resolved.iter_mut().zip(Tradition::ALL) {
            match resolve_passage(&self.store, tradition, &topic, &mut self.rng).await {
                Ok(passage) => *slot = passage,
                Err(Error::NoMatch { .. }) if self.policy == MissingPassagePolicy::Degrade => {
                    warn!(
                        "No {} passage for topic '{}' on {}, leaving it empty",
                        tradition, topic, date
                    );
                    missing.push(tradition);
                }
                Err(e) => return Err(e),
            }
        }

        let [quran, torah, bible, human_design] = resolved;
        let payload = DailyPayload::new(date, topic, quran, torah, bible, human_design);

        Ok(payload.with_meta(PayloadMeta {
            generated_at: time::now(),
            missing,
        }))
    }
}
