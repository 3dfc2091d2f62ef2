use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::config::ResponseFormat;
use crate::errors::AppError;
use crate::models::PaybackQuery;
use crate::services::payback_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(calculate_payback).post(calculate_payback))
}

pub async fn calculate_payback(
    State(state): State<AppState>,
    Query(query): Query<PaybackQuery>,
) -> Result<Response, AppError> {
    info!(
        "Payback request - initial_investment={:?}, annual_cash_flow={:?}",
        query.initial_investment, query.annual_cash_flow
    );

    let period = payback_service::compute_payback(
        query.initial_investment.as_deref(),
        query.annual_cash_flow.as_deref(),
    )
    .map_err(|e| {
        warn!("Rejected payback request: {}", e);
        e
    })?;

    let response = match state.response_format() {
        ResponseFormat::Text => period.to_text().into_response(),
        ResponseFormat::Json => Json(period).into_response(),
    };
    Ok(response)
}
