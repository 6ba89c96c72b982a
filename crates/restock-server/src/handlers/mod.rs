//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod household;
pub mod notifications;
pub mod purchases;
pub mod restock;

// Re-export all handlers for use in router
pub use household::*;
pub use notifications::*;
pub use purchases::*;
pub use restock::*;

use axum::Json;

/// GET /api/health - liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
