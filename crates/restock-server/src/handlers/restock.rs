//! Restock prediction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};

use restock_core::models::{RestockItem, RestockUrgency};
use restock_core::urgent_items;

/// Query parameters for the restock endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockQuery {
    /// When true, only return items the shopper should act on
    #[serde(default)]
    pub urgent_only: bool,
}

/// Restock prediction report for one user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockResponse {
    pub user_id: String,
    pub items: Vec<RestockItem>,
    /// Items already past their predicted restock date
    pub overdue_count: usize,
    /// Items due within the week
    pub due_soon_count: usize,
    pub calculated_at: DateTime<Utc>,
}

/// GET /api/users/:user_id/restock - Predict replenishment needs
///
/// The counts always reflect the full prediction set, even when
/// `urgentOnly` filters the returned items.
pub async fn get_restock(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<RestockQuery>,
) -> Result<Json<RestockResponse>, AppError> {
    let purchases = state.history_for(&user_id);
    let now = Utc::now();

    let items = state.predictor.predict(&purchases, None, now);

    let overdue_count = items
        .iter()
        .filter(|i| i.restock_urgency == RestockUrgency::OrderNow)
        .count();
    let due_soon_count = items
        .iter()
        .filter(|i| {
            matches!(
                i.restock_urgency,
                RestockUrgency::OrderSoon | RestockUrgency::OrderThisWeek
            )
        })
        .count();

    let items = if params.urgent_only {
        urgent_items(&items)
    } else {
        items
    };

    Ok(Json(RestockResponse {
        user_id,
        items,
        overdue_count,
        due_soon_count,
        calculated_at: now,
    }))
}
