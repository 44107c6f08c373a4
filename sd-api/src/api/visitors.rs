//! Visitor counter endpoint

use axum::{extract::State, Json};
use sd_common::VisitorCounter;
use serde::Serialize;

use crate::{ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct VisitorCountResponse {
    pub count: i64,
}

/// GET /api/visitors
pub async fn get_visitors(State(state): State<AppState>) -> ApiResult<Json<VisitorCountResponse>> {
    let count = state.visitors.count().await?;
    Ok(Json(VisitorCountResponse { count }))
}
