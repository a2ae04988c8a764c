use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The category label substituted when a product carries none.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// The profit margin percentage assumed when a product carries none.
pub const DEFAULT_PROFIT_MARGIN: Decimal = dec!(20);

/// A single catalog product, as supplied by the persistence layer.
///
/// `sold_count` and `review_count` are lifetime totals; only orders and
/// reviews are window-bounded by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    pub title: String,
    /// Free-form category label. Normalized to [`UNKNOWN_CATEGORY`] at the
    /// first aggregation use; never surfaced as null in report output.
    pub category: Option<String>,
    /// Unit price. Non-negative by convention; zero is tolerated.
    pub price: Decimal,
    /// Units sold to date.
    pub sold_count: i32,
    /// Average customer rating, 0.0 through 5.0.
    pub rating: Option<f64>,
    pub review_count: i32,
    /// Profit margin percentage, 0 through 100.
    pub profit_margin: Option<Decimal>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductRecord {
    /// The normalized category label for aggregation.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }

    /// The rating with the missing-field default applied.
    pub fn rating_or_default(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// The profit margin percentage with the missing-field default applied.
    pub fn margin_or_default(&self) -> Decimal {
        self.profit_margin.unwrap_or(DEFAULT_PROFIT_MARGIN)
    }

    /// Lifetime revenue attributed to this product: `price * sold_count`.
    /// No rounding is applied here; callers round at display time.
    pub fn revenue(&self) -> Decimal {
        self.price * Decimal::from(self.sold_count)
    }
}

/// A placed order within the reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderRecord {
    pub id: Uuid,
    /// The buyer, when the order is attributed to an account. Drives the
    /// distinct-customer overview counter.
    pub customer_id: Option<Uuid>,
    /// Total order amount.
    pub total: Decimal,
    /// Free-form status label ("pending", "shipped", ...). The aggregator
    /// does not interpret it.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// A customer review within the reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReviewRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Star rating, 0.0 through 5.0.
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}
