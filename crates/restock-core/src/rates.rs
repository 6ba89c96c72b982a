//! Consumption Rate Model
//!
//! Maps a product (by name and category) and a household size to an
//! expected "standard" number of days between purchases. The rate
//! tables are data, not code: they live in `config/rates.toml`
//! (embedded into the binary) and can be overridden from disk without
//! recompilation.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit override path, when one is supplied
//! 2. Embedded defaults (compiled into the binary)

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default rate tables (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/rates.toml");

/// Sublinear household scaling exponent. Larger households don't
/// consume linearly faster: shared meals, economies of scale.
const HOUSEHOLD_SCALING_EXPONENT: f64 = 0.7;

/// A product keyword and its base purchase cycle for a 2-person
/// household. Keywords are matched in order; first match wins.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRate {
    pub keyword: String,
    pub days: i64,
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawRatesConfig {
    default_days: Option<i64>,
    default_lead_time_days: Option<i64>,
    #[serde(default)]
    product: Vec<ProductRate>,
    #[serde(default)]
    category_days: HashMap<String, i64>,
    #[serde(default)]
    lead_time_days: HashMap<String, i64>,
}

/// Consumption rate tables with household-size scaling
#[derive(Debug, Clone)]
pub struct ConsumptionRates {
    /// Ordered keyword table, base days for a 2-person household
    products: Vec<ProductRate>,
    /// Category fallback table, base days for a 2-person household
    category_days: HashMap<String, i64>,
    /// Per-category fulfillment lead times
    lead_times: HashMap<String, i64>,
    /// Generic cycle when neither keyword nor category matches (unscaled)
    default_days: i64,
    /// Lead time when the category has no entry
    default_lead_time: i64,
}

impl ConsumptionRates {
    /// Load the embedded default rate tables
    pub fn new() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Load rate tables, preferring an override file when it exists
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            if path.exists() {
                let content = fs::read_to_string(path)
                    .map_err(|e| Error::Config(format!("Failed to read rates config: {}", e)))?;
                debug!(path = %path.display(), "Loaded rates config override");
                return Self::from_toml_str(&content);
            }
        }
        Self::new()
    }

    /// Parse rate tables from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawRatesConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid rates TOML: {}", e)))?;

        for product in &raw.product {
            if product.days <= 0 {
                return Err(Error::Config(format!(
                    "Non-positive cycle for keyword '{}'",
                    product.keyword
                )));
            }
        }

        Ok(Self {
            products: raw.product,
            category_days: raw.category_days,
            lead_times: raw.lead_time_days,
            default_days: raw.default_days.unwrap_or(14),
            default_lead_time: raw.default_lead_time_days.unwrap_or(2),
        })
    }

    /// Expected days between purchases of a product for a household of
    /// the given size. Always positive.
    ///
    /// Resolution: first matching product keyword, then the category
    /// table (both scaled sublinearly by household size), then the
    /// generic default (unscaled).
    pub fn standard_days(&self, product_name: &str, category: &str, household_size: u32) -> i64 {
        let name = product_name.to_lowercase();

        for rate in &self.products {
            if name.contains(&rate.keyword) {
                return scale_for_household(rate.days, household_size);
            }
        }

        if let Some(&days) = self.category_days.get(category) {
            return scale_for_household(days, household_size);
        }

        debug!(product = product_name, category, "No rate entry; using generic default");
        self.default_days
    }

    /// Fulfillment lead time for a category, in days
    pub fn lead_time_days(&self, category: &str) -> i64 {
        self.lead_times
            .get(category)
            .copied()
            .unwrap_or(self.default_lead_time)
    }
}

impl Default for ConsumptionRates {
    fn default() -> Self {
        // The embedded config is validated by tests; an empty table set
        // still yields usable generic defaults.
        Self::new().unwrap_or_else(|_| Self {
            products: Vec::new(),
            category_days: HashMap::new(),
            lead_times: HashMap::new(),
            default_days: 14,
            default_lead_time: 2,
        })
    }
}

/// Scale a 2-person base cycle to a household of `size` people:
/// `round(base / (size/2)^0.7)`, never below one day.
fn scale_for_household(base_days: i64, size: u32) -> i64 {
    let size = size.max(1) as f64;
    let factor = (size / 2.0).powf(HOUSEHOLD_SCALING_EXPONENT);
    ((base_days as f64 / factor).round() as i64).max(1)
}
