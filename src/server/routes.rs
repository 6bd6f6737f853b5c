//! Service route handlers.
//!
//! All endpoints speak JSON. State is immutable and shared via
//! `Arc<ServiceState>`; every request is computed synchronously.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::billing::{BillingPolicy, Invoice};
use crate::config::AppConfig;
use crate::engine::BidRecommender;
use crate::error::{BillingError, ValidationError};
use crate::types::{Bid, Booking};
use crate::validation::{BidDraft, ValidationReport};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct ServiceState {
    pub name: String,
    pub currency: String,
    pub recommender: BidRecommender,
    pub billing: BillingPolicy,
    pub started_at: DateTime<Utc>,
}

impl ServiceState {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            name: cfg.service.name.clone(),
            currency: cfg.service.currency.clone(),
            recommender: cfg.engine.recommender(),
            billing: cfg.billing.policy(),
            started_at: Utc::now(),
        }
    }
}

pub type AppState = Arc<ServiceState>;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a request, rendered as `{ code, error }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Malformed(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Billing(#[from] BillingError),
}

impl ApiError {
    pub fn code(&self) -> u16 {
        match self {
            ApiError::Malformed(_) => 101,
            ApiError::Validation(_) => 102,
            ApiError::Billing(_) => 103,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Malformed(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) | ApiError::Billing(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            code: self.code(),
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub max_profit: Decimal,
    pub selected_bids: Vec<Bid>,
    pub total_bids: usize,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub service: String,
    pub currency: String,
    pub conflict_search: String,
    pub uptime_secs: i64,
}

/// Accept either a bare array of bids or the bid store's `{ "bids": [...] }`.
pub fn parse_bids(body: serde_json::Value) -> Result<Vec<Bid>, ApiError> {
    let list = match body {
        serde_json::Value::Array(_) => body,
        serde_json::Value::Object(mut obj) => match obj.remove("bids") {
            Some(list @ serde_json::Value::Array(_)) => list,
            _ => {
                return Err(ApiError::Malformed(
                    "expected a `bids` array in the request object".into(),
                ))
            }
        },
        _ => {
            return Err(ApiError::Malformed(
                "expected an array of bids or an object with a `bids` array".into(),
            ))
        }
    };
    serde_json::from_value(list).map_err(|e| ApiError::Malformed(format!("invalid bid: {e}")))
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// POST /api/bids/recommend
pub async fn recommend_bids(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let Json(body) = payload?;
    let bids = parse_bids(body).inspect_err(|e| warn!(error = %e, "Malformed recommend request"))?;

    let rec = state.recommender.recommend(&bids).inspect_err(|e| {
        warn!(bid_id = %e.bid_id(), error = %e, "Bid rejected from recommendation");
    })?;

    info!(
        bids = bids.len(),
        selected = rec.selected_bids.len(),
        max_profit = %rec.max_profit,
        search = %state.recommender.search(),
        "Bids recommended"
    );

    Ok(Json(RecommendResponse {
        max_profit: rec.max_profit,
        selected_bids: rec.selected_bids.into_iter().cloned().collect(),
        total_bids: bids.len(),
        currency: state.currency.clone(),
    }))
}

/// POST /api/bids/validate
pub async fn validate_bid(
    payload: Result<Json<BidDraft>, JsonRejection>,
) -> Result<Json<ValidationReport>, ApiError> {
    let Json(draft) = payload?;
    let report = draft.validate(Utc::now().date_naive());
    debug!(valid = report.is_valid, errors = report.errors.len(), "Bid draft validated");
    Ok(Json(report))
}

/// POST /api/bookings/invoice
pub async fn booking_invoice(
    State(state): State<AppState>,
    payload: Result<Json<Booking>, JsonRejection>,
) -> Result<Json<Invoice>, ApiError> {
    let Json(booking) = payload?;
    let invoice = state.billing.invoice(&booking).inspect_err(|e| {
        warn!(booking_id = %booking.id, error = %e, "Invoice rejected");
    })?;

    info!(
        booking_id = %invoice.booking_id,
        days = invoice.duration_days,
        total = %invoice.total_amount,
        "Invoice computed"
    );
    Ok(Json(invoice))
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        service: state.name.clone(),
        currency: state.currency.clone(),
        conflict_search: state.recommender.search().to_string(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
