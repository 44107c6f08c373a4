//! Database models

use crate::tradition::Tradition;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Delimiter of the `passages.topics` column
pub const TOPIC_DELIMITER: char = ',';

/// Passage to be inserted into the content store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassage {
    pub source: Tradition,
    pub reference: String,
    pub text: String,
    pub topics: Vec<String>,
}

impl NewPassage {
    pub fn new(source: Tradition, reference: &str, text: &str, topics: &[&str]) -> Self {
        Self {
            source,
            reference: reference.to_string(),
            text: text.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Topic list in its stored, comma-delimited form
    ///
    /// Every passage belongs to at least one topic; blank labels are dropped
    /// and an empty result is rejected.
    pub fn topics_column(&self) -> Result<String> {
        let labels: Vec<&str> = self
            .topics
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();

        if labels.is_empty() {
            return Err(Error::InvalidInput(format!(
                "Passage {} ({}) has no topics",
                self.reference, self.source
            )));
        }
        if let Some(bad) = labels.iter().find(|t| t.contains(TOPIC_DELIMITER)) {
            return Err(Error::InvalidInput(format!(
                "Topic label '{}' contains '{}'",
                bad, TOPIC_DELIMITER
            )));
        }

        Ok(labels.join(","))
    }
}

/// Split a stored topic column and return its first label
pub fn first_topic(column: &str) -> Option<&str> {
    column
        .split(TOPIC_DELIMITER)
        .next()
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Reference and text of one tradition's passage, copied into a payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageRef {
    #[serde(rename = "ref")]
    pub reference: String,
    pub text: String,
}

impl PassageRef {
    pub fn new(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty() && self.text.is_empty()
    }
}

/// Generation details recorded alongside a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadMeta {
    pub generated_at: DateTime<Utc>,
    /// Traditions left empty because no passage matched the topic
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<Tradition>,
}

/// The assembled bundle for one calendar day
///
/// Snapshot of passage content at generation time; it does not reference
/// `passages` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPayload {
    pub date: NaiveDate,
    #[serde(rename = "area", alias = "topic")]
    pub topic: String,
    pub quran: PassageRef,
    pub torah: PassageRef,
    pub bible: PassageRef,
    pub human_design: PassageRef,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PayloadMeta>,
}

impl DailyPayload {
    /// Build a payload and its summary sentence from resolved passages
    pub fn new(
        date: NaiveDate,
        topic: impl Into<String>,
        quran: PassageRef,
        torah: PassageRef,
        bible: PassageRef,
        human_design: PassageRef,
    ) -> Self {
        let mut payload = Self {
            date,
            topic: topic.into(),
            quran,
            torah,
            bible,
            human_design,
            summary: String::new(),
            meta: None,
        };
        payload.summary = payload.render_summary();
        payload
    }

    pub fn passage(&self, tradition: Tradition) -> &PassageRef {
        match tradition {
            Tradition::Quran => &self.quran,
            Tradition::Torah => &self.torah,
            Tradition::Bible => &self.bible,
            Tradition::HumanDesign => &self.human_design,
        }
    }

    /// Cross-tradition summary naming the topic and citing every reference
    pub fn render_summary(&self) -> String {
        let citations: Vec<String> = Tradition::ALL
            .iter()
            .map(|t| format!("{} ({})", t.display_name(), self.passage(*t).reference))
            .collect();

        format!(
            "Today's theme is '{}'. Each tradition highlights this value: {}.",
            self.topic,
            citations.join(", ")
        )
    }

    pub fn with_meta(mut self, meta: PayloadMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DailyPayload {
        DailyPayload::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "generosity",
            PassageRef::new("2:261", "q"),
            PassageRef::new("Deuteronomy 15:10", "t"),
            PassageRef::new("2 Corinthians 9:7", "b"),
            PassageRef::new("Gate 27", "h"),
        )
    }

    #[test]
    fn test_summary_template() {
        assert_eq!(
            sample().summary,
            "Today's theme is 'generosity'. Each tradition highlights this value: \
             Qur'an (2:261), Torah (Deuteronomy 15:10), Bible (2 Corinthians 9:7), \
             Human Design (Gate 27)."
        );
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["date"], "2025-01-01");
        assert_eq!(value["area"], "generosity");
        assert_eq!(value["quran"]["ref"], "2:261");
        assert_eq!(value["human_design"]["text"], "h");
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn test_topic_alias_accepted() {
        let json = serde_json::json!({
            "date": "2025-01-01",
            "topic": "patience",
            "quran": {"ref": "", "text": ""},
            "torah": {"ref": "", "text": ""},
            "bible": {"ref": "", "text": ""},
            "human_design": {"ref": "", "text": ""},
            "summary": ""
        });
        let payload: DailyPayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.topic, "patience");
    }

    #[test]
    fn test_topics_column_rejects_empty() {
        let passage = NewPassage::new(Tradition::Bible, "John 3:16", "text", &[" ", ""]);
        assert!(passage.topics_column().is_err());
    }

    #[test]
    fn test_topics_column_joins_trimmed_labels() {
        let passage = NewPassage::new(Tradition::Torah, "x", "y", &["patience ", " hope"]);
        assert_eq!(passage.topics_column().unwrap(), "patience,hope");
    }

    #[test]
    fn test_first_topic() {
        assert_eq!(first_topic("patience,hope"), Some("patience"));
        assert_eq!(first_topic("gratitude"), Some("gratitude"));
        assert_eq!(first_topic(""), None);
    }
}
