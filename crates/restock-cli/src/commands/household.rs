//! Household inference command implementation

use std::path::Path;

use anyhow::{Context, Result};

use restock_core::{estimate_household_size, import};

pub fn cmd_household(file: &Path) -> Result<()> {
    let purchases = import::load_history(file)
        .with_context(|| format!("Failed to load purchase history from {}", file.display()))?;

    let household = estimate_household_size(&purchases);

    println!();
    println!("🏠 Household Estimate");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Records analyzed: {}", purchases.len());
    println!("   Estimated size: {} people", household.estimated_size);
    println!("   Confidence: {:.0}%", household.confidence * 100.0);
    println!("   Signals:");
    for indicator in &household.indicators {
        println!("     • {}", indicator);
    }

    Ok(())
}
