//! Purchase history handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::{AppError, AppState, SuccessResponse, MAX_HISTORY_RECORDS};

use restock_core::import;
use restock_core::models::PurchaseRecord;

/// Response for a history replacement
#[derive(Debug, Serialize)]
pub struct ReplaceResponse {
    pub count: usize,
}

/// GET /api/users/:user_id/purchases - List a user's purchase history
pub async fn list_purchases(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<PurchaseRecord>>, AppError> {
    let purchases = state.history_for(&user_id);
    Ok(Json(purchases))
}

/// PUT /api/users/:user_id/purchases - Replace a user's purchase history
///
/// Accepts either a JSON array of purchase records or raw CSV
/// (Content-Type: text/csv). The upload replaces any existing history
/// for the user wholesale.
pub async fn replace_purchases(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ReplaceResponse>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json");

    let purchases = if content_type.contains("csv") {
        import::parse_csv(body.as_bytes())
            .map_err(|e| AppError::bad_request(&format!("Invalid CSV: {}", e)))?
    } else {
        import::parse_json(&body)
            .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))?
    };

    if purchases.len() > MAX_HISTORY_RECORDS {
        return Err(AppError::payload_too_large(&format!(
            "History exceeds the {} record limit",
            MAX_HISTORY_RECORDS
        )));
    }

    let count = purchases.len();
    state
        .histories
        .write()
        .map_err(|_| AppError::internal("History store unavailable"))?
        .insert(user_id.clone(), purchases);

    info!(user_id = %user_id, count, "Replaced purchase history");

    Ok(Json(ReplaceResponse { count }))
}

/// DELETE /api/users/:user_id/purchases - Clear a user's history
pub async fn clear_purchases(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .histories
        .write()
        .map_err(|_| AppError::internal("History store unavailable"))?
        .remove(&user_id);

    info!(user_id = %user_id, "Cleared purchase history");

    Ok(Json(SuccessResponse { success: true }))
}
