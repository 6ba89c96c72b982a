//! Human-readable messages for restock predictions
//!
//! The notification surface renders one line per item; the branching
//! here is part of the engine's contract even though rendering itself
//! is the caller's job.

use crate::models::{RestockItem, RestockUrgency};

/// One-line banner message for a restock prediction
pub fn restock_message(item: &RestockItem) -> String {
    if item.days_until_suggested_order <= 0 {
        return format!(
            "You're overdue to reorder {} - consider a subscription so it never runs out",
            item.name
        );
    }

    match item.restock_urgency {
        RestockUrgency::OrderNow | RestockUrgency::OrderSoon => {
            format!("Order {} today to have it before you run out", item.name)
        }
        RestockUrgency::OrderThisWeek => {
            format!(
                "You'll need {} soon - about {} days left",
                item.name, item.days_until_restock
            )
        }
        _ => format!(
            "{} looks all set for about {} more days",
            item.name, item.days_until_restock
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictionMethod;
    use chrono::Utc;

    fn item(urgency: RestockUrgency, days_until_suggested_order: i64) -> RestockItem {
        let now = Utc::now();
        RestockItem {
            sku: "MILK-1".to_string(),
            name: "Whole Milk".to_string(),
            category: "Dairy & Eggs".to_string(),
            image: String::new(),
            price: 3.49,
            total_purchases: 3,
            last_purchased: now,
            days_since_last_purchase: 9,
            average_days_between_purchases: 10,
            standard_consumption_days: 10,
            predicted_days_until_restock: days_until_suggested_order + 1,
            predicted_next_purchase: now,
            lead_time_days: 1,
            suggested_order_date: now,
            days_until_suggested_order,
            days_until_restock: days_until_suggested_order + 1,
            restock_urgency: urgency,
            confidence_score: 0.75,
            prediction_method: PredictionMethod::Blended,
        }
    }

    #[test]
    fn test_overdue_suggests_subscription() {
        let msg = restock_message(&item(RestockUrgency::OrderNow, -2));
        assert!(msg.contains("overdue"));
        assert!(msg.contains("subscription"));
    }

    #[test]
    fn test_order_soon_says_today() {
        let msg = restock_message(&item(RestockUrgency::OrderSoon, 1));
        assert!(msg.contains("today"));
    }

    #[test]
    fn test_this_week_says_soon() {
        let msg = restock_message(&item(RestockUrgency::OrderThisWeek, 3));
        assert!(msg.contains("soon"));
    }

    #[test]
    fn test_stocked_is_neutral() {
        let msg = restock_message(&item(RestockUrgency::WellStocked, 10));
        assert!(msg.contains("all set"));
    }
}
