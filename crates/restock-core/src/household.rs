//! Household size estimation from purchase history
//!
//! Infers how many people a purchase history is feeding from heuristic
//! signals (gallon milk volume, baby products, bulk buying, school-age
//! snacks). Each signal is an independent rule; all rules evaluate and
//! the largest implied size wins, so adding a new signal never requires
//! touching the existing ones.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{HouseholdContext, PurchaseRecord};

static INFANT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"diaper|formula|baby").unwrap());

static SCHOOL_AGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"juice box|juice-box|lunchbox|lunch|snack").unwrap());

/// A household-size heuristic: evaluates the full purchase list and,
/// when it fires, returns the implied minimum size and an indicator
/// message for explainability.
type SizeSignal = fn(&[PurchaseRecord]) -> Option<(u32, String)>;

/// All signals, in detection order. Order only affects the indicator
/// list; the size estimate is the max over fired signals.
const SIGNALS: &[SizeSignal] = &[
    gallon_milk_signal,
    infant_signal,
    bulk_purchase_signal,
    school_age_signal,
];

/// Infer a household size estimate and confidence from raw purchase
/// history.
///
/// Never fails: with no signals (or no purchases at all) the default
/// 2-person household is returned at low confidence.
pub fn estimate_household_size(purchases: &[PurchaseRecord]) -> HouseholdContext {
    let mut estimated_size: u32 = 2;
    let mut indicators = Vec::new();

    for signal in SIGNALS {
        if let Some((implied_size, indicator)) = signal(purchases) {
            debug!(implied_size, indicator = %indicator, "Household signal fired");
            estimated_size = estimated_size.max(implied_size);
            indicators.push(indicator);
        }
    }

    if indicators.is_empty() {
        return HouseholdContext::default();
    }

    let confidence = if indicators.len() >= 2 { 0.8 } else { 0.6 };

    HouseholdContext {
        estimated_size,
        confidence,
        indicators,
    }
}

/// Three or more gallon-milk purchases averaging 2+ per order suggests
/// a family of four or more.
fn gallon_milk_signal(purchases: &[PurchaseRecord]) -> Option<(u32, String)> {
    let gallons: Vec<&PurchaseRecord> = purchases
        .iter()
        .filter(|p| {
            let name = p.name.to_lowercase();
            name.contains("milk") && name.contains("gallon")
        })
        .collect();

    if gallons.len() < 3 {
        return None;
    }

    let mean_quantity =
        gallons.iter().map(|p| p.quantity as f64).sum::<f64>() / gallons.len() as f64;

    if mean_quantity >= 2.0 {
        Some((
            4,
            "Frequent multi-gallon milk purchases suggest a larger family".to_string(),
        ))
    } else {
        None
    }
}

/// Repeated diaper/formula/baby purchases indicate at least one infant
/// plus caretakers.
fn infant_signal(purchases: &[PurchaseRecord]) -> Option<(u32, String)> {
    let count = purchases
        .iter()
        .filter(|p| INFANT_PATTERN.is_match(&p.name.to_lowercase()))
        .count();

    if count >= 3 {
        Some((3, "Baby products indicate a household with an infant".to_string()))
    } else {
        None
    }
}

/// A high share of bulk purchases (quantity 3+ or multi-packs) points
/// to more mouths to feed.
fn bulk_purchase_signal(purchases: &[PurchaseRecord]) -> Option<(u32, String)> {
    if purchases.is_empty() {
        return None;
    }

    let bulk_count = purchases
        .iter()
        .filter(|p| p.quantity >= 3 || p.name.to_lowercase().contains("pack"))
        .count();

    let bulk_share = bulk_count as f64 / purchases.len() as f64;

    if bulk_share > 0.3 {
        Some((3, "Bulk purchasing pattern suggests 3+ people".to_string()))
    } else {
        None
    }
}

/// Juice boxes, lunch items, and snacks in volume are a school-age
/// children tell.
fn school_age_signal(purchases: &[PurchaseRecord]) -> Option<(u32, String)> {
    let count = purchases
        .iter()
        .filter(|p| SCHOOL_AGE_PATTERN.is_match(&p.name.to_lowercase()))
        .count();

    if count >= 5 {
        Some((
            4,
            "Lunch and snack products indicate school-age children".to_string(),
        ))
    } else {
        None
    }
}
