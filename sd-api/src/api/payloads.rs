//! Daily payload endpoints
//!
//! Both handlers are pure reads. A date with no stored payload is a 404,
//! never a trigger to generate one.

use axum::{
    extract::{Path, State},
    Json,
};
use sd_common::time::parse_date_key;
use sd_common::{DailyPayload, PayloadStore, VisitorCounter};
use tracing::{info, warn};

use crate::{ApiError, ApiResult, AppState};

/// GET /api/today
///
/// Counts the visit, then returns today's payload.
pub async fn get_today(State(state): State<AppState>) -> ApiResult<Json<DailyPayload>> {
    // Counter failures never block the read
    if let Err(e) = state.visitors.increment().await {
        warn!("Visitor count update failed: {}", e);
    }

    let today = (state.today)();
    match state.payloads.get_by_date(today).await {
        Ok(payload) => Ok(Json(payload)),
        Err(e) if e.is_not_found() => {
            info!("No payload generated yet for {}", today);
            Err(ApiError::NotFound)
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /api/post/:date
///
/// Archive lookup; `date` must be `YYYY-MM-DD`.
pub async fn get_post(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<DailyPayload>> {
    let date = parse_date_key(&date).map_err(|_| ApiError::BadDate(date))?;
    let payload = state.payloads.get_by_date(date).await?;
    Ok(Json(payload))
}
