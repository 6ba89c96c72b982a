//! Prediction command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use restock_core::models::{HouseholdContext, RestockItem, RestockUrgency};
use restock_core::{import, restock_message, ConsumptionRates, RestockPredictor};

use super::truncate;

pub fn cmd_predict(
    file: &Path,
    rates_path: Option<&Path>,
    urgent_only: bool,
    json: bool,
    household_size: Option<u32>,
) -> Result<()> {
    let purchases = import::load_history(file)
        .with_context(|| format!("Failed to load purchase history from {}", file.display()))?;

    let rates = ConsumptionRates::load(rates_path).context("Failed to load consumption rates")?;
    let predictor = RestockPredictor::new(rates);

    // An explicit size wins over inference
    let household = household_size.map(|size| HouseholdContext {
        estimated_size: size.max(1),
        confidence: 1.0,
        indicators: vec![format!("User-specified {}-person household", size.max(1))],
    });

    let mut items = predictor.predict(&purchases, household.as_ref(), Utc::now());
    if urgent_only {
        items.retain(|i| i.restock_urgency.is_actionable());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!();
        if urgent_only {
            println!("✅ Nothing needs reordering right now");
        } else {
            println!("No replenishable products found in {}", file.display());
        }
        return Ok(());
    }

    println!();
    println!("🛒 Restock Predictions ({} records)", purchases.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for item in &items {
        print_item(item);
    }

    let urgent = items
        .iter()
        .filter(|i| i.restock_urgency.is_actionable())
        .count();
    println!();
    println!("   {} item(s), {} needing action", items.len(), urgent);

    Ok(())
}

fn print_item(item: &RestockItem) {
    let icon = urgency_icon(item.restock_urgency);
    let due = if item.days_until_restock < 0 {
        format!("{}d overdue", -item.days_until_restock)
    } else {
        format!("due in {}d", item.days_until_restock)
    };

    println!(
        "   {} {:28} │ {:>12} │ {:7} {:.0}% │ every {}d",
        icon,
        truncate(&item.name, 28),
        due,
        item.prediction_method,
        item.confidence_score * 100.0,
        item.average_days_between_purchases,
    );

    if item.restock_urgency.is_actionable() {
        println!("      {}", restock_message(item));
    }
}

fn urgency_icon(urgency: RestockUrgency) -> &'static str {
    match urgency {
        RestockUrgency::OrderNow => "🔴",
        RestockUrgency::OrderSoon => "🟠",
        RestockUrgency::OrderThisWeek => "🟡",
        RestockUrgency::PlanAhead => "🔵",
        RestockUrgency::WellStocked => "🟢",
    }
}
