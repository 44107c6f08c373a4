//! # Scripture Daily Common Library
//!
//! Shared code for the Scripture Daily API server and daily worker:
//! - Database initialization, models and seed content
//! - Store interfaces and the SQLite implementation
//! - Topic selection, passage resolution and payload assembly
//! - Configuration loading and log filter setup
//! - Date key utilities

pub mod assembler;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod selection;
pub mod store;
pub mod time;
pub mod tradition;

pub use assembler::{MissingPassagePolicy, PayloadAssembler};
pub use db::models::{DailyPayload, NewPassage, PassageRef, PayloadMeta};
pub use error::{Error, Result};
pub use store::{ContentStore, PayloadStore, SqliteStore, VisitorCounter};
pub use tradition::Tradition;
