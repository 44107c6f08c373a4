//! HTTP API handlers for sd-api

pub mod health;
pub mod payloads;
pub mod subscription;
pub mod visitors;

pub use health::health_routes;
pub use payloads::{get_post, get_today};
pub use subscription::{send_daily, subscribe_email};
pub use visitors::get_visitors;
