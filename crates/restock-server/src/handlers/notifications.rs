//! Notification feed handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{AppError, AppState};

use restock_core::models::RestockItem;
use restock_core::restock_message;

/// Maximum notifications surfaced per user
const MAX_NOTIFICATIONS: usize = 3;

/// A single notification banner
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    pub item: RestockItem,
}

/// Notification feed for one user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsResponse {
    pub user_id: String,
    pub notifications: Vec<Notification>,
    pub calculated_at: DateTime<Utc>,
}

/// GET /api/users/:user_id/notifications - Actionable restock banners
///
/// Returns at most three notifications, taken from the top of the
/// ranked prediction list so the most urgent items surface first.
pub async fn get_notifications(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<NotificationsResponse>, AppError> {
    let purchases = state.history_for(&user_id);
    let now = Utc::now();

    let items = state.predictor.predict(&purchases, None, now);

    let notifications: Vec<Notification> = items
        .into_iter()
        .filter(|i| i.restock_urgency.is_actionable())
        .take(MAX_NOTIFICATIONS)
        .map(|item| Notification {
            message: restock_message(&item),
            item,
        })
        .collect();

    Ok(Json(NotificationsResponse {
        user_id,
        notifications,
        calculated_at: now,
    }))
}
