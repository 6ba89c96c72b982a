//! Restock Core Library
//!
//! Replenishment forecasting for a shopping assistant:
//! - Household size estimation from heuristic purchase signals
//! - Consumption rate model with sublinear household scaling
//! - Replenishment predictor (interval statistics, prior blending,
//!   lead-time scheduling, urgency classification)
//! - Purchase history import (CSV/JSON)
//! - Notification message formatting
//!
//! The engine is a pure function of its inputs: no I/O during
//! prediction, no caching across calls, and a single caller-captured
//! "now" threaded through every computation.

pub mod error;
pub mod format;
pub mod household;
pub mod import;
pub mod models;
pub mod predict;
pub mod rates;

pub use error::{Error, Result};
pub use format::restock_message;
pub use household::estimate_household_size;
pub use models::{
    HouseholdContext, PredictionMethod, PurchaseRecord, RestockItem, RestockUrgency,
};
pub use predict::{urgent_items, PredictorConfig, RestockPredictor};
pub use rates::ConsumptionRates;
