//! Calendar-day utilities
//!
//! Payloads are keyed by ISO calendar dates (`YYYY-MM-DD`). Every component
//! formats and parses keys through this module so they round-trip exactly.

use crate::{Error, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};

/// Date key format shared by storage and the HTTP API
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current calendar day in the server's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date as a storage key
pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a storage key, rejecting anything that does not round-trip
///
/// `2025-1-1` parses under chrono's lenient numeric fields but would be
/// stored as `2025-01-01`, so it is refused.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("Invalid date '{}': {}", key, e)))?;

    if format_date_key(date) != key {
        return Err(Error::InvalidInput(format!(
            "Date '{}' is not in YYYY-MM-DD form",
            key
        )));
    }

    Ok(date)
}
