use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info, warn};

use crate::config::ResponseFormat;
use crate::errors::AppError;
use crate::models::{HistoryEntry, RoiQuery};
use crate::services::{record_service, roi_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calculate_roi).post(calculate_roi))
        .route("/history", get(fetch_history))
}

/// Calculates ROI from the `investment` and `gains` query parameters.
///
/// Accepts GET and POST; only the query string is read. Pass
/// `persist=false` to skip recording the calculation.
///
/// # Example
/// ```text
/// GET /api/roi?investment=1000&gains=1500  ->  ROI: 50.00%
/// ```
#[axum::debug_handler]
pub async fn calculate_roi(
    State(state): State<AppState>,
    Query(query): Query<RoiQuery>,
) -> Result<Response, AppError> {
    info!(
        "ROI request - investment={:?}, gains={:?}",
        query.investment, query.gains
    );

    let calculation = roi_service::compute_roi(query.investment.as_deref(), query.gains.as_deref())
        .map_err(|e| {
            warn!(
                "Rejected ROI request (investment={:?}, gains={:?}): {}",
                query.investment, query.gains, e
            );
            e
        })?;

    info!(
        "Investment: {}, Gains: {}, ROI: {:.2}%",
        calculation.investment, calculation.gains, calculation.roi
    );

    if query.persist.unwrap_or(true) {
        record_service::persist(
            state.record_store.as_ref(),
            state.persistence(),
            state.config.store_timeout,
            &calculation,
        )
        .await?;
    }

    let response = match state.response_format() {
        ResponseFormat::Text => calculation.to_text().into_response(),
        ResponseFormat::Json => Json(calculation).into_response(),
    };
    Ok(response)
}

pub async fn fetch_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    info!("GET history - Listing stored calculations");
    let store = state.record_store.as_ref().ok_or_else(|| {
        AppError::StoreUnavailable("no record store configured".to_string())
    })?;

    let entries = record_service::list_history(store, state.config.store_timeout)
        .await
        .map_err(|e| {
            error!("Failed to list calculation history: {}", e);
            e
        })?;
    Ok(Json(entries))
}
