//! Integration tests for restock-core
//!
//! These tests exercise the full import → household estimate → predict
//! pipeline with fixed clocks.

use chrono::{DateTime, Duration, Utc};

use restock_core::{
    estimate_household_size,
    import::parse_csv,
    restock_message, urgent_items, ConsumptionRates, PredictionMethod, PurchaseRecord,
    RestockPredictor, RestockUrgency,
};

fn fixed_now() -> DateTime<Utc> {
    "2026-08-15T00:00:00Z".parse().unwrap()
}

fn purchase(sku: &str, name: &str, category: &str, days_ago: i64) -> PurchaseRecord {
    PurchaseRecord {
        sku: sku.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        image: String::new(),
        price: 3.49,
        quantity: 1,
        purchased_at: fixed_now() - Duration::days(days_ago),
    }
}

fn predictor() -> RestockPredictor {
    RestockPredictor::new(ConsumptionRates::new().expect("embedded rates config"))
}

// =============================================================================
// Whole Milk scenario: purchases at day -29, -19, -9 relative to now
// =============================================================================

#[test]
fn test_milk_replenishment_scenario() {
    let purchases: Vec<PurchaseRecord> = [29, 19, 9]
        .iter()
        .map(|&d| purchase("MILK-1", "Whole Milk", "Dairy & Eggs", d))
        .collect();

    let items = predictor().predict(&purchases, None, fixed_now());
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item.days_since_last_purchase, 9);
    assert_eq!(item.average_days_between_purchases, 10);
    // 3 purchases with perfectly regular gaps: cv = 0 < 0.5
    assert_eq!(item.prediction_method, PredictionMethod::Blended);
    assert!((item.confidence_score - 0.75).abs() < f64::EPSILON);
    assert_eq!(item.days_until_restock, 1);
    // Dairy ships in a day, so the suggested order date is today
    assert_eq!(item.lead_time_days, 1);
    assert_eq!(item.days_until_suggested_order, 0);
    assert_eq!(item.restock_urgency, RestockUrgency::OrderNow);
}

#[test]
fn test_milk_scenario_message() {
    let purchases: Vec<PurchaseRecord> = [29, 19, 9]
        .iter()
        .map(|&d| purchase("MILK-1", "Whole Milk", "Dairy & Eggs", d))
        .collect();

    let items = predictor().predict(&purchases, None, fixed_now());
    let msg = restock_message(&items[0]);
    // days_until_suggested_order == 0 lands in the overdue branch
    assert!(msg.contains("Whole Milk"));
    assert!(msg.contains("subscription"));
}

// =============================================================================
// CSV → predict pipeline
// =============================================================================

#[test]
fn test_csv_import_to_prediction() {
    let csv = "\
sku,name,category,image,price,quantity,purchased_at
MILK-1,Whole Milk,Dairy & Eggs,,3.49,1,2026-07-17
MILK-1,Whole Milk,Dairy & Eggs,,3.49,1,2026-07-27
MILK-1,Whole Milk,Dairy & Eggs,,3.49,1,2026-08-06
TV-9,55in Television,Electronics,,499.00,1,2026-08-01
";
    let purchases = parse_csv(csv.as_bytes()).expect("CSV should parse");
    assert_eq!(purchases.len(), 4);

    let items = predictor().predict(&purchases, None, fixed_now());
    // The television is not replenishable and never appears
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sku, "MILK-1");
}

// =============================================================================
// Ranking and filtering across many skus
// =============================================================================

#[test]
fn test_ranked_output_and_urgent_filter() {
    let mut purchases = Vec::new();
    // Overdue with strong history: order_now at 0.95
    for d in [60, 50, 40, 30, 20] {
        purchases.push(purchase("MILK-1", "Whole Milk", "Dairy & Eggs", d));
    }
    // Overdue with thin history: order_now at 0.6
    for d in [40, 20] {
        purchases.push(purchase("BRD-1", "Sourdough Bread", "Bakery & Bread", d));
    }
    // Bought yesterday: well stocked
    purchases.push(purchase("COF-1", "Ground Coffee", "Coffee & Tea", 1));

    let items = predictor().predict(&purchases, None, fixed_now());
    assert_eq!(items.len(), 3);

    // Severity ascending, confidence descending inside the tier
    assert_eq!(items[0].sku, "MILK-1");
    assert_eq!(items[1].sku, "BRD-1");
    assert_eq!(items[2].restock_urgency, RestockUrgency::WellStocked);

    let urgent = urgent_items(&items);
    assert_eq!(urgent.len(), 2);
    assert!(urgent.iter().all(|i| i.restock_urgency.is_actionable()));
}

// =============================================================================
// Household context flows into the rate model
// =============================================================================

#[test]
fn test_larger_household_shortens_cycle() {
    // A big-family history: repeated multi-gallon milk purchases
    let mut family: Vec<PurchaseRecord> = Vec::new();
    for d in [21, 14, 7] {
        let mut p = purchase("MILK-G", "Whole Milk 1 Gallon", "Dairy & Eggs", d);
        p.quantity = 2;
        family.push(p);
    }
    family.push(purchase("BRD-1", "Sourdough Bread", "Bakery & Bread", 3));

    let ctx = estimate_household_size(&family);
    assert_eq!(ctx.estimated_size, 4);

    let rates = ConsumptionRates::new().unwrap();
    let small = rates.standard_days("Sourdough Bread", "Bakery & Bread", 2);
    let large = rates.standard_days("Sourdough Bread", "Bakery & Bread", ctx.estimated_size);
    assert!(large < small);

    // The single bread purchase yields a standard-method prediction
    // using the scaled rate
    let items = predictor().predict(&family, Some(&ctx), fixed_now());
    let bread = items.iter().find(|i| i.sku == "BRD-1").unwrap();
    assert_eq!(bread.prediction_method, PredictionMethod::Standard);
    assert_eq!(bread.standard_consumption_days, large);
}

// =============================================================================
// Degenerate inputs never fail
// =============================================================================

#[test]
fn test_empty_history() {
    let items = predictor().predict(&[], None, fixed_now());
    assert!(items.is_empty());

    let ctx = estimate_household_size(&[]);
    assert_eq!(ctx.estimated_size, 2);
}

#[test]
fn test_single_sparse_purchase_still_predicts() {
    let purchases = vec![purchase("UNK-1", "Artisanal Tonic", "Beverages", 3)];
    let items = predictor().predict(&purchases, None, fixed_now());
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.prediction_method, PredictionMethod::Standard);
    assert!((item.confidence_score - 0.4).abs() < f64::EPSILON);
    assert!(item.average_days_between_purchases > 0);
}
