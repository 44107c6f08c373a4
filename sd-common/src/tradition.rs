//! The four fixed source traditions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source tradition of a passage
///
/// Stored in the `passages.source` column and used as the JSON key of the
/// matching field in a daily payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tradition {
    Quran,
    Torah,
    Bible,
    HumanDesign,
}

impl Tradition {
    /// All traditions, in payload order
    pub const ALL: [Tradition; 4] = [
        Tradition::Quran,
        Tradition::Torah,
        Tradition::Bible,
        Tradition::HumanDesign,
    ];

    /// Storage identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Tradition::Quran => "quran",
            Tradition::Torah => "torah",
            Tradition::Bible => "bible",
            Tradition::HumanDesign => "human_design",
        }
    }

    /// Human-readable name used in summaries and emails
    pub fn display_name(&self) -> &'static str {
        match self {
            Tradition::Quran => "Qur'an",
            Tradition::Torah => "Torah",
            Tradition::Bible => "Bible",
            Tradition::HumanDesign => "Human Design",
        }
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tradition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Tradition::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown tradition: {}", s)))
    }
}
