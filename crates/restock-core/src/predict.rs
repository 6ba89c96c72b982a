//! Replenishment prediction
//!
//! For each distinct previously-purchased product, blends the
//! household's own purchase-interval statistics with the standard
//! consumption rate prior, projects when the product runs out, shifts
//! that date earlier by the category's fulfillment lead time, and
//! classifies how urgently a reorder should be placed.
//!
//! The predictor is a pure function of its inputs: the caller supplies
//! the purchase history and a single captured "now", and the same
//! instant is reused across every sku so all items agree on what
//! "today" means.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::household::estimate_household_size;
use crate::models::{HouseholdContext, PredictionMethod, PurchaseRecord, RestockItem, RestockUrgency};
use crate::rates::ConsumptionRates;

/// Predictor configuration
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Categories subject to recurring repurchase. Closed-world filter:
    /// skus outside this set are silently excluded, not scored low.
    pub replenishable_categories: HashSet<String>,
    /// Minimum purchases for the historical tier
    pub historical_min_purchases: usize,
    /// Maximum interval coefficient of variation for the historical tier
    pub historical_max_cv: f64,
    /// Minimum purchases for the history-weighted blended tier
    pub blended_min_purchases: usize,
    /// Maximum interval coefficient of variation for the history-weighted
    /// blended tier
    pub blended_max_cv: f64,
    /// Weight of the empirical average in the history-weighted blend
    /// (the standard rate gets the remainder)
    pub strong_blend_weight: f64,
    /// Weight of the empirical average in the prior-weighted blend
    pub weak_blend_weight: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        let replenishable_categories = [
            "Dairy & Eggs",
            "Bakery & Bread",
            "Fresh Produce",
            "Beverages",
            "Meat & Seafood",
            "Baby Food & Formula",
            "Pet Food",
            "Coffee & Tea",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            replenishable_categories,
            historical_min_purchases: 5,
            historical_max_cv: 0.3,
            blended_min_purchases: 3,
            blended_max_cv: 0.5,
            strong_blend_weight: 0.6,
            weak_blend_weight: 0.4,
        }
    }
}

/// Confidence assigned to each blending tier
const CONFIDENCE_HISTORICAL: f64 = 0.95;
const CONFIDENCE_BLENDED_STRONG: f64 = 0.75;
const CONFIDENCE_BLENDED_WEAK: f64 = 0.6;
const CONFIDENCE_STANDARD: f64 = 0.4;

/// Replenishment predictor over a consumption rate model
pub struct RestockPredictor {
    rates: ConsumptionRates,
    config: PredictorConfig,
}

impl RestockPredictor {
    pub fn new(rates: ConsumptionRates) -> Self {
        Self {
            rates,
            config: PredictorConfig::default(),
        }
    }

    pub fn with_config(rates: ConsumptionRates, config: PredictorConfig) -> Self {
        Self { rates, config }
    }

    pub fn rates(&self) -> &ConsumptionRates {
        &self.rates
    }

    /// Predict restock needs from a purchase history.
    ///
    /// When no household context is supplied, one is inferred from the
    /// same purchase list. The result is sorted by urgency (most urgent
    /// first), tie-broken by descending confidence.
    pub fn predict(
        &self,
        purchases: &[PurchaseRecord],
        household: Option<&HouseholdContext>,
        now: DateTime<Utc>,
    ) -> Vec<RestockItem> {
        if purchases.is_empty() {
            return Vec::new();
        }

        let inferred;
        let household = match household {
            Some(ctx) => ctx,
            None => {
                inferred = estimate_household_size(purchases);
                &inferred
            }
        };

        // Group by sku, preserving first-seen order so ties sort
        // deterministically
        let mut order: Vec<&str> = Vec::new();
        let mut by_sku: HashMap<&str, Vec<&PurchaseRecord>> = HashMap::new();
        for purchase in purchases {
            by_sku
                .entry(purchase.sku.as_str())
                .or_insert_with(|| {
                    order.push(purchase.sku.as_str());
                    Vec::new()
                })
                .push(purchase);
        }

        let mut items: Vec<RestockItem> = Vec::new();
        for sku in order {
            let records = &by_sku[sku];
            if let Some(item) = self.predict_item(records, household, now) {
                items.push(item);
            }
        }

        // Stable sort: severity rank ascending, then confidence descending
        items.sort_by(|a, b| {
            a.restock_urgency
                .severity()
                .cmp(&b.restock_urgency.severity())
                .then_with(|| {
                    b.confidence_score
                        .partial_cmp(&a.confidence_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        items
    }

    /// Predict one sku's restock need, or None when the category is not
    /// replenishable
    fn predict_item(
        &self,
        records: &[&PurchaseRecord],
        household: &HouseholdContext,
        now: DateTime<Utc>,
    ) -> Option<RestockItem> {
        let first = records.first()?;

        if !self
            .config
            .replenishable_categories
            .contains(&first.category)
        {
            return None;
        }

        let mut sorted: Vec<&PurchaseRecord> = records.to_vec();
        sorted.sort_by_key(|p| p.purchased_at);

        let last = *sorted.last()?;
        let days_since_last_purchase = whole_days_between(now, last.purchased_at);

        let standard_days =
            self.rates
                .standard_days(&last.name, &last.category, household.estimated_size);

        // Consecutive day gaps between purchases
        let gaps: Vec<f64> = sorted
            .windows(2)
            .map(|w| whole_days_between(w[1].purchased_at, w[0].purchased_at) as f64)
            .collect();

        let actual_average = mean(&gaps);
        let cv = coefficient_of_variation(&gaps);

        let (prediction_method, average_days, confidence_score) = if sorted.len()
            >= self.config.historical_min_purchases
            && cv < self.config.historical_max_cv
        {
            (
                PredictionMethod::Historical,
                actual_average.round() as i64,
                CONFIDENCE_HISTORICAL,
            )
        } else if sorted.len() >= self.config.blended_min_purchases && cv < self.config.blended_max_cv
        {
            let blended = self.config.strong_blend_weight * actual_average
                + (1.0 - self.config.strong_blend_weight) * standard_days as f64;
            (
                PredictionMethod::Blended,
                blended.round() as i64,
                CONFIDENCE_BLENDED_STRONG,
            )
        } else if sorted.len() >= 2 {
            let blended = self.config.weak_blend_weight * actual_average
                + (1.0 - self.config.weak_blend_weight) * standard_days as f64;
            (
                PredictionMethod::Blended,
                blended.round() as i64,
                CONFIDENCE_BLENDED_WEAK,
            )
        } else {
            (
                PredictionMethod::Standard,
                standard_days,
                CONFIDENCE_STANDARD,
            )
        };

        // The cycle must stay positive: same-day repurchases can drag an
        // empirical average to zero, in which case the standard rate
        // (always positive) takes over.
        let average_days = if average_days > 0 {
            average_days
        } else {
            standard_days
        };

        let predicted_next_purchase = last.purchased_at + Duration::days(average_days);
        let days_until_restock = whole_days_between(predicted_next_purchase, now);

        let lead_time_days = self.rates.lead_time_days(&last.category);
        let suggested_order_date = predicted_next_purchase - Duration::days(lead_time_days);
        let days_until_suggested_order = whole_days_between(suggested_order_date, now);

        let restock_urgency = classify_urgency(days_until_suggested_order);

        debug!(
            sku = %last.sku,
            method = %prediction_method,
            average_days,
            standard_days,
            days_until_suggested_order,
            urgency = %restock_urgency,
            "Predicted restock"
        );

        Some(RestockItem {
            sku: last.sku.clone(),
            name: last.name.clone(),
            category: last.category.clone(),
            image: last.image.clone(),
            price: last.price,
            total_purchases: sorted.len(),
            last_purchased: last.purchased_at,
            days_since_last_purchase,
            average_days_between_purchases: average_days,
            standard_consumption_days: standard_days,
            predicted_days_until_restock: days_until_restock,
            predicted_next_purchase,
            lead_time_days,
            suggested_order_date,
            days_until_suggested_order,
            days_until_restock,
            restock_urgency,
            confidence_score,
            prediction_method,
        })
    }
}

/// Keep only the items worth prompting the user about right now
pub fn urgent_items(items: &[RestockItem]) -> Vec<RestockItem> {
    items
        .iter()
        .filter(|i| i.restock_urgency.is_actionable())
        .cloned()
        .collect()
}

/// Classify urgency from the days remaining until the suggested order
/// date. First match wins.
fn classify_urgency(days_until_suggested_order: i64) -> RestockUrgency {
    if days_until_suggested_order <= 0 {
        RestockUrgency::OrderNow
    } else if days_until_suggested_order <= 1 {
        RestockUrgency::OrderSoon
    } else if days_until_suggested_order <= 3 {
        RestockUrgency::OrderThisWeek
    } else if days_until_suggested_order <= 7 {
        RestockUrgency::PlanAhead
    } else {
        RestockUrgency::WellStocked
    }
}

/// Whole days from `earlier` to `later`, rounded toward negative
/// infinity so an overdue span counts every fully elapsed day. Plain
/// duration truncation would under-report overdue magnitudes by a day.
fn whole_days_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier).num_seconds().div_euclid(86_400)
}

/// Mean of a slice (0.0 when empty)
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Coefficient of variation (stddev / mean), 0.0 when undefined.
/// Population standard deviation; the gaps are the full interval set,
/// not a sample.
fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if values.is_empty() || m <= 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt() / m
}
