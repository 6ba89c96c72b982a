//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::PathBuf;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use crate::commands::{self, truncate};

/// Write a JSON purchase history into the temp dir, returning its path
fn write_history_json(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

fn milk_history() -> String {
    let now = Utc::now();
    serde_json::json!([
        {
            "sku": "MILK-1",
            "name": "Whole Milk Gallon",
            "category": "Dairy & Eggs",
            "price": 4.99,
            "purchasedAt": (now - Duration::days(29)).to_rfc3339(),
        },
        {
            "sku": "MILK-1",
            "name": "Whole Milk Gallon",
            "category": "Dairy & Eggs",
            "price": 4.99,
            "purchasedAt": (now - Duration::days(19)).to_rfc3339(),
        },
        {
            "sku": "MILK-1",
            "name": "Whole Milk Gallon",
            "category": "Dairy & Eggs",
            "price": 4.99,
            "purchasedAt": (now - Duration::days(9)).to_rfc3339(),
        }
    ])
    .to_string()
}

// ========== Predict Command Tests ==========

#[test]
fn test_cmd_predict_json_history() {
    let dir = TempDir::new().unwrap();
    let path = write_history_json(&dir, "orders.json", &milk_history());

    commands::cmd_predict(&path, None, false, false, None).unwrap();
}

#[test]
fn test_cmd_predict_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_history_json(&dir, "orders.json", &milk_history());

    commands::cmd_predict(&path, None, true, true, None).unwrap();
}

#[test]
fn test_cmd_predict_household_override() {
    let dir = TempDir::new().unwrap();
    let path = write_history_json(&dir, "orders.json", &milk_history());

    commands::cmd_predict(&path, None, false, false, Some(5)).unwrap();
}

#[test]
fn test_cmd_predict_csv_history() {
    let dir = TempDir::new().unwrap();
    let csv = "sku,name,category,price,purchased_at\n\
               BRD-1,Sourdough Loaf,Bakery & Bread,3.49,2026-08-01\n\
               BRD-1,Sourdough Loaf,Bakery & Bread,3.49,2026-08-06\n";
    let path = write_history_json(&dir, "orders.csv", csv);

    commands::cmd_predict(&path, None, false, false, None).unwrap();
}

#[test]
fn test_cmd_predict_missing_file() {
    let result = commands::cmd_predict(
        std::path::Path::new("/nonexistent/orders.json"),
        None,
        false,
        false,
        None,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_predict_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_history_json(&dir, "orders.txt", "whatever");

    let result = commands::cmd_predict(&path, None, false, false, None);
    assert!(result.is_err());
}

// ========== Household Command Tests ==========

#[test]
fn test_cmd_household() {
    let dir = TempDir::new().unwrap();
    let path = write_history_json(&dir, "orders.json", &milk_history());

    commands::cmd_household(&path).unwrap();
}

#[test]
fn test_cmd_household_empty_history() {
    let dir = TempDir::new().unwrap();
    let path = write_history_json(&dir, "orders.json", "[]");

    commands::cmd_household(&path).unwrap();
}

// ========== Rates Command Tests ==========

#[test]
fn test_cmd_rates_builtin_table() {
    commands::cmd_rates(None, "Whole Milk Gallon", "Dairy & Eggs", 2).unwrap();
}

#[test]
fn test_cmd_rates_override_file() {
    let dir = TempDir::new().unwrap();
    let toml = "default_days = 21\n\
                default_lead_time_days = 3\n\n\
                [[product]]\n\
                keyword = \"milk\"\n\
                days = 6\n";
    let path = write_history_json(&dir, "rates.toml", toml);

    commands::cmd_rates(Some(&path), "Oat Milk", "Beverages", 2).unwrap();
}

#[test]
fn test_cmd_rates_invalid_override() {
    let dir = TempDir::new().unwrap();
    let path = write_history_json(&dir, "rates.toml", "not valid toml [");

    let result = commands::cmd_rates(Some(&path), "Milk", "Dairy & Eggs", 2);
    assert!(result.is_err());
}

// ========== Helpers ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long product name", 10), "a very ...");
}

#[test]
fn test_truncate_multibyte_names() {
    // Cut points landing inside a multibyte char back up to a boundary
    assert_eq!(truncate("ααααααααα", 10), "ααα...");

    let name = "Crème fraîche entière bio 500g";
    let truncated = truncate(name, 25);
    assert!(truncated.ends_with("..."));
    assert!(truncated.len() <= 25);
}

#[test]
fn test_cmd_predict_multibyte_product_name() {
    let dir = TempDir::new().unwrap();
    let now = Utc::now();
    let history = serde_json::json!([{
        "sku": "CRM-1",
        "name": "Crème fraîche entière bio 500g de la crèmerie",
        "category": "Dairy & Eggs",
        "price": 2.99,
        "purchasedAt": (now - Duration::days(12)).to_rfc3339(),
    }])
    .to_string();
    let path = write_history_json(&dir, "orders.json", &history);

    commands::cmd_predict(&path, None, false, false, None).unwrap();
}
