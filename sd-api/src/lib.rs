//! sd-api library - Scripture Daily HTTP API
//!
//! Serves stored daily payloads. The read path never assembles content;
//! payloads are written by `sd-worker`.

use axum::Router;
use chrono::NaiveDate;
use sd_common::{PayloadStore, SqliteStore, VisitorCounter};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod email;
pub mod error;

pub use crate::error::{ApiError, ApiResult};
use crate::email::Mailer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Payload reader
    pub payloads: Arc<dyn PayloadStore>,
    /// Landing page visitor counter
    pub visitors: Arc<dyn VisitorCounter>,
    /// Outgoing mail transport
    pub mailer: Arc<dyn Mailer>,
    /// Public site URL used in email links
    pub base_url: String,
    /// Source of "today"; replaced in tests
    pub today: fn() -> NaiveDate,
}

impl AppState {
    /// Create application state over a SQLite store
    pub fn new(store: SqliteStore, mailer: Arc<dyn Mailer>, base_url: impl Into<String>) -> Self {
        let store = Arc::new(store);
        Self {
            payloads: store.clone(),
            visitors: store,
            mailer,
            base_url: base_url.into(),
            today: sd_common::time::today,
        }
    }

    /// Override the clock used by `/api/today` and `/api/send-daily`
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/today", get(api::get_today))
        .route("/api/post/:date", get(api::get_post))
        .route("/api/visitors", get(api::get_visitors))
        .route("/api/subscribe/email", post(api::subscribe_email))
        .route("/api/send-daily", post(api::send_daily))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
