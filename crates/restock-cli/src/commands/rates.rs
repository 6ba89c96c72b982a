//! Consumption-rate inspection command implementation

use std::path::Path;

use anyhow::{Context, Result};

use restock_core::ConsumptionRates;

pub fn cmd_rates(rates_path: Option<&Path>, name: &str, category: &str, size: u32) -> Result<()> {
    let rates = ConsumptionRates::load(rates_path).context("Failed to load consumption rates")?;

    let size = size.max(1);
    let days = rates.standard_days(name, category, size);
    let baseline = rates.standard_days(name, category, 2);
    let lead = rates.lead_time_days(category);

    println!();
    println!("📋 Consumption Rate");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Product: {}", name);
    println!("   Category: {}", category);
    println!("   Household size: {}", size);
    println!();
    println!("   Standard cycle: every {} days", days);
    if size != 2 {
        println!("   2-person baseline: every {} days", baseline);
    }
    println!("   Order lead time: {} day(s)", lead);

    Ok(())
}
