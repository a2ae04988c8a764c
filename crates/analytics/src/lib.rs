//! # Shopfront Analytics Engine
//!
//! This crate turns a raw snapshot of storefront activity (products, orders,
//! reviews) into the structured `AnalyticsReport` the dashboard consumes.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes borrowed record slices as input and produces an
//!   `AnalyticsReport` as output, never touching the network, disk, or any
//!   shared state. This makes it highly reliable and easy to test, and safe
//!   to call concurrently against disjoint snapshots.
//! - **Total Function:** The engine never fails. Missing optional fields
//!   substitute documented defaults and every ratio guards its denominator,
//!   so degenerate input yields a zeroed report rather than an error.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the aggregation logic.
//! - `AnalyticsReport`: The standardized struct that holds the overview,
//!   trend, insight and recommendation sections.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use report::{
    AnalyticsReport, CategoryOpportunity, CategoryPerformance, CategoryProfit, CategorySales,
    Insights, MonthlyRevenue, Overview, ProductInsight, ProductMetrics, ProductSales,
    ProfitAnalysis, Recommendation, SeasonalTrend, Trends,
};
