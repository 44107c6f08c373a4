//! Example content for a fresh database
//!
//! Seeding only happens while the `passages` table is empty, so running the
//! worker repeatedly never duplicates content.

use crate::db::models::NewPassage;
use crate::store::SqliteStore;
use crate::tradition::Tradition;
use crate::Result;
use tracing::info;

/// Built-in passages covering each tradition for every seeded topic
pub fn example_passages() -> Vec<NewPassage> {
    use Tradition::*;

    vec![
        // generosity
        NewPassage::new(
            Quran,
            "Al-Baqarah 2:261",
            "The likeness of those who spend their wealth in Allah's way is as the likeness of a grain which groweth seven ears, in every ear a hundred grains.",
            &["generosity", "charity"],
        ),
        NewPassage::new(
            Torah,
            "Deuteronomy 15:10",
            "Thou shalt surely give him, and thy heart shall not be grieved when thou givest unto him.",
            &["generosity"],
        ),
        NewPassage::new(
            Bible,
            "2 Corinthians 9:7",
            "Every man according as he purposeth in his heart, so let him give; not grudgingly, or of necessity: for God loveth a cheerful giver.",
            &["generosity", "gratitude"],
        ),
        NewPassage::new(
            HumanDesign,
            "Gate 27 - Nourishment",
            "Caring for others from a place of sufficiency; giving that sustains both the giver and the receiver.",
            &["generosity"],
        ),
        // patience
        NewPassage::new(
            Quran,
            "Al-Baqarah 2:153",
            "O ye who believe! Seek help in steadfastness and prayer. Lo! Allah is with the steadfast.",
            &["patience"],
        ),
        NewPassage::new(
            Torah,
            "Exodus 34:6",
            "The LORD, the LORD, God, merciful and gracious, long-suffering, and abundant in goodness and truth.",
            &["patience", "mercy"],
        ),
        NewPassage::new(
            Bible,
            "James 1:4",
            "But let patience have her perfect work, that ye may be perfect and entire, wanting nothing.",
            &["patience"],
        ),
        NewPassage::new(
            HumanDesign,
            "Gate 5 - Fixed Rhythms",
            "Waiting for the right timing; trusting natural rhythms rather than forcing outcomes.",
            &["patience"],
        ),
        // gratitude
        NewPassage::new(
            Quran,
            "Ibrahim 14:7",
            "If ye give thanks, I will give you more.",
            &["gratitude"],
        ),
        NewPassage::new(
            Torah,
            "Deuteronomy 8:10",
            "And thou shalt eat and be satisfied, and bless the LORD thy God for the good land which He hath given thee.",
            &["gratitude"],
        ),
        NewPassage::new(
            Bible,
            "1 Thessalonians 5:18",
            "In every thing give thanks: for this is the will of God in Christ Jesus concerning you.",
            &["gratitude"],
        ),
        NewPassage::new(
            HumanDesign,
            "Gate 19 - Wanting",
            "Sensitivity to needs; recognising what sustains us and honouring it.",
            &["gratitude"],
        ),
        // justice
        NewPassage::new(
            Quran,
            "An-Nisa 4:135",
            "O ye who believe! Be ye staunch in justice, witnesses for Allah, even though it be against yourselves.",
            &["justice"],
        ),
        NewPassage::new(
            Torah,
            "Deuteronomy 16:20",
            "Justice, justice shalt thou follow, that thou mayest live.",
            &["justice"],
        ),
        NewPassage::new(
            Bible,
            "Micah 6:8",
            "What doth the LORD require of thee, but to do justly, and to love mercy, and to walk humbly with thy God?",
            &["justice", "mercy"],
        ),
        NewPassage::new(
            HumanDesign,
            "Gate 48 - Depth",
            "Bringing depth and fairness to what is shared; solutions that serve the whole.",
            &["justice"],
        ),
    ]
}

/// Insert the example passages if the content store is empty
///
/// Returns the number of passages inserted (0 when content already exists).
pub async fn seed_example_passages(store: &SqliteStore) -> Result<usize> {
    if store.passage_count().await? > 0 {
        return Ok(0);
    }

    let passages = example_passages();
    store.insert_passages(&passages).await?;
    info!("Seeded {} example passages", passages.len());
    Ok(passages.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_topic_covers_every_tradition() {
        let passages = example_passages();
        let topics: HashSet<String> = passages
            .iter()
            .flat_map(|p| p.topics.iter().cloned())
            .collect();

        for topic in ["generosity", "patience", "gratitude", "justice"] {
            assert!(topics.contains(topic));
            for tradition in Tradition::ALL {
                assert!(
                    passages
                        .iter()
                        .any(|p| p.source == tradition && p.topics.iter().any(|t| t == topic)),
                    "{} has no {} passage",
                    topic,
                    tradition
                );
            }
        }
    }

    #[test]
    fn test_every_example_is_valid() {
        for passage in example_passages() {
            assert!(passage.topics_column().is_ok());
        }
    }
}
