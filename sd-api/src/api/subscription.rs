//! Subscription and daily email endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::email::{render_welcome_email, send_daily_email, DailyDelivery, DeliveryError, Mailer};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Serialize)]
pub struct EmailSummary {
    pub to: String,
    pub subject: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    pub email_status: String,
    pub email: EmailSummary,
}

/// POST /api/subscribe/email
///
/// Validates the form and sends the welcome email.
pub async fn subscribe_email(
    State(state): State<AppState>,
    body: Result<Json<SubscribeRequest>, JsonRejection>,
) -> ApiResult<Json<SubscribeResponse>> {
    let Json(request) = body.map_err(|_| ApiError::BadRequest("invalid_json"))?;

    if request.full_name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(ApiError::BadRequest("missing_required_fields"));
    }

    info!(
        "[subscription] New subscription: {} <{}> ({}, {}, {})",
        request.full_name, request.email, request.address, request.city, request.country
    );

    let welcome = render_welcome_email(&request.full_name, &request.email);
    let delivery = state.mailer.send(&welcome).await.map_err(|e| {
        error!("[email] Welcome email to {} failed: {}", request.email, e);
        ApiError::EmailSendFailed(e.to_string())
    })?;

    Ok(Json(SubscribeResponse {
        success: true,
        message: "Subscription successful! Check your email for confirmation.".to_string(),
        email_status: delivery.as_status().to_string(),
        email: EmailSummary {
            to: welcome.to,
            subject: welcome.subject,
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct SendDailyRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDailyResponse {
    pub success: bool,
    pub message: String,
    pub date: String,
    pub email_status: String,
}

/// POST /api/send-daily
///
/// Mails today's stored payload. Before the worker has run for today this
/// is a 404, not a server error.
pub async fn send_daily(
    State(state): State<AppState>,
    body: Result<Json<SendDailyRequest>, JsonRejection>,
) -> ApiResult<Json<SendDailyResponse>> {
    let Json(request) = body.map_err(|_| ApiError::BadRequest("invalid_json"))?;

    if request.email.trim().is_empty() {
        return Err(ApiError::BadRequest("email_required"));
    }

    let today = (state.today)();
    let outcome = send_daily_email(
        state.payloads.as_ref(),
        state.mailer.as_ref(),
        &request.email,
        today,
        &state.base_url,
    )
    .await
    .map_err(|e| match e {
        DeliveryError::Store(e) => ApiError::from(e),
        DeliveryError::Mail(e) => {
            error!("[email] Daily email to {} failed: {}", request.email, e);
            ApiError::EmailSendFailed(e.to_string())
        }
    })?;

    match outcome {
        DailyDelivery::NothingToSend => Err(ApiError::NothingToSend),
        DailyDelivery::Delivered(delivery) => Ok(Json(SendDailyResponse {
            success: true,
            message: "Daily scripture sent successfully!".to_string(),
            date: sd_common::time::format_date_key(today),
            email_status: delivery.as_status().to_string(),
        })),
    }
}
