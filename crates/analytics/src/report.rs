use chrono::{DateTime, Utc};
use core_types::{Impact, RecommendationKind, Season};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comprehensive, standardized analytics report for one reporting window.
///
/// This struct is the final output of the `AnalyticsEngine` and serves as the
/// data transfer object for storefront analytics throughout the entire
/// system. Field names serialize in the camelCase form the dashboard expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub overview: Overview,
    pub trends: Trends,
    pub insights: Insights,
    pub recommendations: Vec<Recommendation>,
    /// The inclusive lower bound of the reporting window. Recorded for
    /// traceability only; the engine never recomputes it.
    pub window_start: DateTime<Utc>,
    /// Wall-clock time the report was built. The one field excluded from
    /// the engine's determinism guarantee.
    pub generated_at: DateTime<Utc>,
}

impl AnalyticsReport {
    /// Creates a zeroed-out report: all counters zero, all lists empty.
    /// This is what degenerate (all-empty) input produces.
    pub fn empty(window_start: DateTime<Utc>, generated_at: DateTime<Utc>) -> Self {
        Self {
            overview: Overview::default(),
            trends: Trends::default(),
            insights: Insights::default(),
            recommendations: Vec::new(),
            window_start,
            generated_at,
        }
    }
}

/// Headline counters for the reporting window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Count of active catalog products (not window-bounded).
    pub total_products: usize,
    pub total_orders: usize,
    pub total_revenue: Decimal,
    /// Distinct customers attributed to window orders.
    pub total_customers: usize,
    /// Mean product rating across the active catalog.
    pub average_rating: f64,
    pub total_reviews: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    /// Top categories by revenue, descending, capped at 10.
    pub top_categories: Vec<CategorySales>,
    /// Top products by units sold, descending, capped at 20.
    pub top_products: Vec<ProductSales>,
    /// Revenue and order counts bucketed by calendar month, chronological.
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub category_performance: Vec<CategoryPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    pub category: String,
    /// Number of products in the category.
    pub count: usize,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub id: Uuid,
    pub title: String,
    /// Units sold to date.
    pub sales: i32,
    pub revenue: Decimal,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    /// Display label such as "Jan 2024". Buckets are keyed and ordered by
    /// the underlying (year, month) pair, never by re-parsing this label.
    pub month: String,
    pub revenue: Decimal,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category: String,
    /// Window orders per catalog product in this category, as a percentage.
    /// Orders carry no category, so this is the approximate overall-orders
    /// signal; see DESIGN.md.
    pub conversion_rate: f64,
    pub avg_order_value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Top 10 products by units sold, each with its full metric bundle.
    pub best_performing_products: Vec<ProductInsight>,
    /// Categories ranked by opportunity potential, capped at 5.
    pub category_opportunities: Vec<CategoryOpportunity>,
    /// A single entry tagged with the current calendar season.
    pub seasonal_trends: Vec<SeasonalTrend>,
    pub profit_analysis: ProfitAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInsight {
    pub id: Uuid,
    pub title: String,
    pub metrics: ProductMetrics,
}

/// The per-product metric bundle embedded in best-performer insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMetrics {
    pub sales: i32,
    pub revenue: Decimal,
    pub rating: f64,
    pub reviews: i32,
    pub profit_margin: Decimal,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOpportunity {
    pub category: String,
    pub opportunity: String,
    pub potential: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalTrend {
    pub season: Season,
    pub trend: String,
    pub impact: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAnalysis {
    pub total_profit: Decimal,
    /// Overall margin as a percentage of total product revenue.
    pub profit_margin: Decimal,
    /// Top 5 categories by absolute profit, descending.
    pub top_profit_categories: Vec<CategoryProfit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProfit {
    pub category: String,
    pub profit: Decimal,
    /// Category margin as a percentage of category revenue.
    pub margin: Decimal,
}

/// A single rule-triggered suggestion. Rules are evaluated independently;
/// every rule that matches contributes one entry, in rule order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub action: String,
}
