//! The fixed sample report served when the data source is unavailable.
//!
//! Dashboard clients always receive a well-formed report; a storefront whose
//! database is down shows representative sample figures instead of an error
//! page. The catalog below is fixed (stable identifiers, fixed timestamps),
//! so the fallback renders identically on every request.

use analytics::{AnalyticsEngine, AnalyticsReport};
use chrono::{DateTime, TimeZone, Utc};
use core_types::{OrderRecord, ProductRecord, ReviewRecord};
use rust_decimal_macros::dec;
use uuid::Uuid;

fn fixed_date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

/// Builds the fallback report for the given window by running the engine
/// over the fixed sample catalog.
pub fn fallback_report(window_start: DateTime<Utc>) -> AnalyticsReport {
    let (products, orders, reviews) = sample_snapshot();
    AnalyticsEngine::new().build_report(&products, &orders, &reviews, window_start)
}

fn sample_product(
    id: u128,
    title: &str,
    category: &str,
    price: rust_decimal::Decimal,
    sold_count: i32,
    rating: f64,
    review_count: i32,
) -> ProductRecord {
    ProductRecord {
        id: Uuid::from_u128(id),
        title: title.to_string(),
        category: Some(category.to_string()),
        price,
        sold_count,
        rating: Some(rating),
        review_count,
        profit_margin: Some(dec!(35)),
        tags: vec!["featured".to_string()],
        created_at: fixed_date(2024, 1, 1, 0, 0),
    }
}

fn sample_snapshot() -> (Vec<ProductRecord>, Vec<OrderRecord>, Vec<ReviewRecord>) {
    let products = vec![
        sample_product(1, "Wireless Headphones Pro", "Electronics", dec!(89.99), 45, 4.8, 156),
        sample_product(2, "Smart Fitness Watch", "Electronics", dec!(199.99), 32, 4.6, 89),
        sample_product(3, "Portable Phone Charger", "Accessories", dec!(24.99), 67, 4.4, 203),
        sample_product(4, "Cozy Fleece Blanket", "Home", dec!(34.99), 28, 4.7, 54),
    ];

    let orders = vec![
        OrderRecord {
            id: Uuid::from_u128(101),
            customer_id: Some(Uuid::from_u128(201)),
            total: dec!(114.98),
            status: "delivered".to_string(),
            created_at: fixed_date(2024, 1, 12, 9, 30),
        },
        OrderRecord {
            id: Uuid::from_u128(102),
            customer_id: Some(Uuid::from_u128(202)),
            total: dec!(199.99),
            status: "shipped".to_string(),
            created_at: fixed_date(2024, 2, 3, 14, 5),
        },
        OrderRecord {
            id: Uuid::from_u128(103),
            customer_id: Some(Uuid::from_u128(201)),
            total: dec!(59.98),
            status: "pending".to_string(),
            created_at: fixed_date(2024, 2, 18, 19, 45),
        },
    ];

    let reviews = vec![
        ReviewRecord {
            id: Uuid::from_u128(301),
            product_id: Uuid::from_u128(1),
            rating: 5.0,
            created_at: fixed_date(2024, 1, 15, 11, 0),
        },
        ReviewRecord {
            id: Uuid::from_u128(302),
            product_id: Uuid::from_u128(3),
            rating: 4.0,
            created_at: fixed_date(2024, 2, 20, 16, 20),
        },
    ];

    (products, orders, reviews)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_report_is_populated_and_stable() {
        let window_start = Utc.with_ymd_and_hms(2024, 2, 23, 0, 0, 0).unwrap();
        let first = fallback_report(window_start);
        let second = fallback_report(window_start);

        assert_eq!(first.overview.total_products, 4);
        assert_eq!(first.overview.total_orders, 3);
        assert_eq!(first.overview.total_customers, 2);
        assert!(!first.trends.top_categories.is_empty());
        assert_eq!(first.trends.monthly_revenue[0].month, "Jan 2024");

        // Byte-identical modulo the generation timestamp.
        assert_eq!(first.overview, second.overview);
        assert_eq!(first.trends, second.trends);
        assert_eq!(first.insights, second.insights);
        assert_eq!(first.recommendations, second.recommendations);
    }
}
