//! Common error types for Scripture Daily

use crate::tradition::Tradition;
use chrono::NaiveDate;
use thiserror::Error;

/// Common result type for Scripture Daily operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the worker and the API
///
/// Selection-level conditions (`NoMatch`) are normally absorbed by the
/// assembler; storage-level conditions always reach the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// Store could not be opened (fatal at startup)
    #[error("Store not configured: {0}")]
    NotConfigured(String),

    /// No passage of `tradition` carries `topic`
    #[error("No {tradition} passage matches topic '{topic}'")]
    NoMatch { tradition: Tradition, topic: String },

    /// No payload stored for the requested date
    #[error("No payload for {0}")]
    NotFound(NaiveDate),

    /// Stored payload for `date` failed to deserialize
    #[error("Corrupt payload for {date}: {reason}")]
    CorruptPayload { date: NaiveDate, reason: String },

    /// Database operation error (wraps sqlx::Error)
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Payload could not be serialized for storage
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True for the expected "nothing stored for this date" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
