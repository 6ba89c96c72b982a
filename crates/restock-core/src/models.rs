//! Domain models for Restock

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_quantity() -> u32 {
    1
}

/// A single line item from a historical order.
///
/// Owned by the caller; the engine never mutates purchase records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub sku: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
    /// Units purchased in this line item (absent in some exports)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub purchased_at: DateTime<Utc>,
}

/// Inferred household context used to scale consumption rates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdContext {
    /// Estimated number of people in the household
    pub estimated_size: u32,
    /// Confidence in the estimate, 0.0..=1.0
    pub confidence: f64,
    /// Which heuristics fired, in detection order (for explainability)
    pub indicators: Vec<String>,
}

impl Default for HouseholdContext {
    fn default() -> Self {
        Self {
            estimated_size: 2,
            confidence: 0.4,
            indicators: vec!["Default 2-person household".to_string()],
        }
    }
}

/// How soon a reorder should be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestockUrgency {
    OrderNow,
    OrderSoon,
    OrderThisWeek,
    PlanAhead,
    WellStocked,
}

impl RestockUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderNow => "order_now",
            Self::OrderSoon => "order_soon",
            Self::OrderThisWeek => "order_this_week",
            Self::PlanAhead => "plan_ahead",
            Self::WellStocked => "well_stocked",
        }
    }

    /// Numeric severity rank for sorting (lower = more urgent)
    pub fn severity(&self) -> u8 {
        match self {
            Self::OrderNow => 0,
            Self::OrderSoon => 1,
            Self::OrderThisWeek => 2,
            Self::PlanAhead => 3,
            Self::WellStocked => 4,
        }
    }

    /// Whether this tier warrants prompting the user now
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::OrderNow | Self::OrderSoon | Self::OrderThisWeek)
    }
}

impl std::str::FromStr for RestockUrgency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "order_now" => Ok(Self::OrderNow),
            "order_soon" => Ok(Self::OrderSoon),
            "order_this_week" => Ok(Self::OrderThisWeek),
            "plan_ahead" => Ok(Self::PlanAhead),
            "well_stocked" => Ok(Self::WellStocked),
            _ => Err(format!("Unknown urgency: {}", s)),
        }
    }
}

impl std::fmt::Display for RestockUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much of a prediction rests on this household's own data versus
/// population priors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMethod {
    /// Enough consistent history to trust the empirical cycle alone
    Historical,
    /// Weighted mix of empirical cycle and standard rate
    Blended,
    /// Standard rate only (fewer than 2 purchases)
    Standard,
}

impl PredictionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Blended => "blended",
            Self::Standard => "standard",
        }
    }
}

impl std::str::FromStr for PredictionMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "historical" => Ok(Self::Historical),
            "blended" => Ok(Self::Blended),
            "standard" => Ok(Self::Standard),
            _ => Err(format!("Unknown prediction method: {}", s)),
        }
    }
}

impl std::fmt::Display for PredictionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A replenishment prediction for one previously-purchased product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockItem {
    // Identity
    pub sku: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: f64,

    // History stats
    pub total_purchases: usize,
    pub last_purchased: DateTime<Utc>,
    pub days_since_last_purchase: i64,

    // Frequency analysis
    pub average_days_between_purchases: i64,
    pub standard_consumption_days: i64,
    pub predicted_days_until_restock: i64,
    pub predicted_next_purchase: DateTime<Utc>,

    // Scheduling
    pub lead_time_days: i64,
    pub suggested_order_date: DateTime<Utc>,
    pub days_until_suggested_order: i64,
    /// Negative when the predicted run-out date has already passed
    pub days_until_restock: i64,

    // Classification
    pub restock_urgency: RestockUrgency,
    pub confidence_score: f64,
    pub prediction_method: PredictionMethod,
}
