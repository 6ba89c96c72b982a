//! Household estimation handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};

use restock_core::estimate_household_size;
use restock_core::models::HouseholdContext;

/// GET /api/users/:user_id/household - Estimate household composition
///
/// Returns the default 2-person context when the user has no history.
pub async fn get_household(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<HouseholdContext>, AppError> {
    let purchases = state.history_for(&user_id);
    Ok(Json(estimate_household_size(&purchases)))
}
