//! Purchase history import parsers
//!
//! The engine itself consumes already-validated `PurchaseRecord`s; this
//! module is the upstream validation layer that turns CSV or JSON
//! exports into those records. Malformed rows fail the import with row
//! context rather than silently skewing predictions.

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::PurchaseRecord;

/// Parse purchase history from CSV.
///
/// Expected header: `sku,name,category,image,price,quantity,purchased_at`
/// (column order is irrelevant; `image` and `quantity` are optional).
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<PurchaseRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

    let sku_col = column("sku").ok_or_else(|| Error::Import("Missing 'sku' column".into()))?;
    let name_col = column("name").ok_or_else(|| Error::Import("Missing 'name' column".into()))?;
    let category_col =
        column("category").ok_or_else(|| Error::Import("Missing 'category' column".into()))?;
    let price_col = column("price").ok_or_else(|| Error::Import("Missing 'price' column".into()))?;
    let date_col = column("purchased_at")
        .ok_or_else(|| Error::Import("Missing 'purchased_at' column".into()))?;
    let image_col = column("image");
    let quantity_col = column("quantity");

    let mut records = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        let line = row + 2; // 1-based, after the header

        let field = |col: usize, what: &str| -> Result<&str> {
            record
                .get(col)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::Import(format!("Row {}: missing {}", line, what)))
        };

        let sku = field(sku_col, "sku")?.to_string();
        let name = field(name_col, "name")?.to_string();
        let category = field(category_col, "category")?.to_string();

        let price: f64 = field(price_col, "price")?
            .parse()
            .map_err(|_| Error::Import(format!("Row {}: invalid price", line)))?;

        let purchased_at = parse_timestamp(field(date_col, "purchased_at")?)
            .ok_or_else(|| Error::Import(format!("Row {}: invalid purchased_at", line)))?;

        let image = image_col
            .and_then(|c| record.get(c))
            .unwrap_or("")
            .trim()
            .to_string();

        let quantity: u32 = match quantity_col.and_then(|c| record.get(c)).map(str::trim) {
            Some("") | None => 1,
            Some(q) => q
                .parse()
                .map_err(|_| Error::Import(format!("Row {}: invalid quantity", line)))?,
        };

        let record = PurchaseRecord {
            sku,
            name,
            category,
            image,
            price,
            quantity,
            purchased_at,
        };
        validate(&record, line)?;
        records.push(record);
    }

    debug!(count = records.len(), "Parsed purchase history CSV");
    Ok(records)
}

/// Parse purchase history from a JSON array of records
pub fn parse_json(content: &str) -> Result<Vec<PurchaseRecord>> {
    let records: Vec<PurchaseRecord> = serde_json::from_str(content)?;
    for (i, record) in records.iter().enumerate() {
        validate(record, i + 1)?;
    }
    debug!(count = records.len(), "Parsed purchase history JSON");
    Ok(records)
}

/// Load purchase history from a file, dispatching on extension
pub fn load_history(path: &Path) -> Result<Vec<PurchaseRecord>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            let file = fs::File::open(path)?;
            parse_csv(file)
        }
        Some("json") => {
            let content = fs::read_to_string(path)?;
            parse_json(&content)
        }
        other => Err(Error::Import(format!(
            "Unsupported history format: {:?} (expected .csv or .json)",
            other
        ))),
    }
}

/// The shape guarantees the engine assumes: non-negative price,
/// positive quantity
fn validate(record: &PurchaseRecord, row: usize) -> Result<()> {
    if record.price < 0.0 {
        return Err(Error::InvalidData(format!(
            "Row {}: negative price for sku {}",
            row, record.sku
        )));
    }
    if record.quantity == 0 {
        return Err(Error::InvalidData(format!(
            "Row {}: zero quantity for sku {}",
            row, record.sku
        )));
    }
    Ok(())
}

/// Parse a timestamp in RFC 3339, `YYYY-MM-DD HH:MM:SS`, or date-only
/// `YYYY-MM-DD` form (dates are taken as midnight UTC)
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
sku,name,category,image,price,quantity,purchased_at
MILK-1,Whole Milk,Dairy & Eggs,,3.49,1,2026-07-01
MILK-1,Whole Milk,Dairy & Eggs,,3.49,2,2026-07-11T09:30:00Z
BRD-1,Sourdough Bread,Bakery & Bread,bread.png,4.99,,2026-07-02 08:00:00
";

    #[test]
    fn test_parse_csv() {
        let records = parse_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].sku, "MILK-1");
        assert_eq!(records[0].quantity, 1);
        assert_eq!(records[1].quantity, 2);
        // Empty quantity defaults to 1
        assert_eq!(records[2].quantity, 1);
        assert_eq!(records[2].image, "bread.png");
    }

    #[test]
    fn test_parse_csv_column_order_irrelevant() {
        let csv = "\
name,purchased_at,price,sku,category
Whole Milk,2026-07-01,3.49,MILK-1,Dairy & Eggs
";
        let records = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(records[0].sku, "MILK-1");
        assert_eq!(records[0].image, "");
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let csv = "name,price\nWhole Milk,3.49\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("sku"));
    }

    #[test]
    fn test_parse_csv_bad_date_reports_row() {
        let csv = "\
sku,name,category,price,purchased_at
MILK-1,Whole Milk,Dairy & Eggs,3.49,not-a-date
";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn test_rejects_negative_price() {
        let csv = "\
sku,name,category,price,purchased_at
MILK-1,Whole Milk,Dairy & Eggs,-1.00,2026-07-01
";
        assert!(parse_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[
            {
                "sku": "MILK-1",
                "name": "Whole Milk",
                "category": "Dairy & Eggs",
                "price": 3.49,
                "purchasedAt": "2026-07-01T00:00:00Z"
            }
        ]"#;
        let records = parse_json(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity, 1);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert!(parse_timestamp("2026-07-01T09:30:00Z").is_some());
        assert!(parse_timestamp("2026-07-01 09:30:00").is_some());
        assert!(parse_timestamp("2026-07-01").is_some());
        assert!(parse_timestamp("July 1").is_none());
    }
}
