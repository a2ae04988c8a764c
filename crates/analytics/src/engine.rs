use crate::report::{
    AnalyticsReport, CategoryOpportunity, CategoryPerformance, CategoryProfit, CategorySales,
    Insights, MonthlyRevenue, Overview, ProductInsight, ProductMetrics, ProductSales,
    ProfitAnalysis, Recommendation, SeasonalTrend, Trends,
};
use chrono::{DateTime, Datelike, Utc};
use core_types::{Impact, OrderRecord, ProductRecord, RecommendationKind, ReviewRecord, Season};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// A stateless calculator for deriving storefront analytics from a snapshot
/// of catalog activity.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for building an analytics report.
    ///
    /// # Arguments
    ///
    /// * `products` - The full active-product set (not window-bounded).
    /// * `orders` - Orders with `created_at >= window_start`, pre-filtered
    ///   by the caller.
    /// * `reviews` - Reviews with `created_at >= window_start`, pre-filtered
    ///   by the caller.
    /// * `window_start` - The window lower bound, recorded for traceability.
    ///
    /// # Returns
    ///
    /// The assembled `AnalyticsReport`. This never fails: empty collections
    /// produce a zeroed report, missing optional fields substitute their
    /// documented defaults, and every ratio guards its denominator.
    pub fn build_report(
        &self,
        products: &[ProductRecord],
        orders: &[OrderRecord],
        reviews: &[ReviewRecord],
        window_start: DateTime<Utc>,
    ) -> AnalyticsReport {
        let generated_at = Utc::now();

        if products.is_empty() && orders.is_empty() && reviews.is_empty() {
            // Nothing to aggregate. Return the zeroed report rather than
            // emitting placeholder trend entries.
            return AnalyticsReport::empty(window_start, generated_at);
        }

        tracing::debug!(
            products = products.len(),
            orders = orders.len(),
            reviews = reviews.len(),
            "building analytics report"
        );

        let season = Season::from_month(generated_at.month());

        AnalyticsReport {
            overview: self.build_overview(products, orders, reviews),
            trends: Trends {
                top_categories: self.top_categories(products),
                top_products: self.top_products(products),
                monthly_revenue: self.monthly_revenue(orders),
                category_performance: self.category_performance(products, orders),
            },
            insights: Insights {
                best_performing_products: self.best_performing_products(products),
                category_opportunities: self.category_opportunities(products),
                seasonal_trends: self.seasonal_trends(products, season),
                profit_analysis: self.profit_analysis(products),
            },
            recommendations: self.recommendations(products),
            window_start,
            generated_at,
        }
    }

    /// Headline counters: catalog size, window order volume and revenue,
    /// distinct customers, mean rating, window review count.
    fn build_overview(
        &self,
        products: &[ProductRecord],
        orders: &[OrderRecord],
        reviews: &[ReviewRecord],
    ) -> Overview {
        let total_revenue: Decimal = orders.iter().map(|o| o.total).sum();
        let customers: HashSet<Uuid> = orders.iter().filter_map(|o| o.customer_id).collect();

        let average_rating = if products.is_empty() {
            0.0
        } else {
            products.iter().map(|p| p.rating_or_default()).sum::<f64>() / products.len() as f64
        };

        Overview {
            total_products: products.len(),
            total_orders: orders.len(),
            total_revenue: total_revenue.round_dp(2),
            total_customers: customers.len(),
            average_rating,
            total_reviews: reviews.len(),
        }
    }

    /// Rolls products up by category, ranks categories by lifetime revenue
    /// descending, and keeps the top 10. Ties keep category-name order.
    fn top_categories(&self, products: &[ProductRecord]) -> Vec<CategorySales> {
        let mut rollup: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
        for product in products {
            let entry = rollup
                .entry(product.category_label())
                .or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += product.revenue();
        }

        let mut categories: Vec<CategorySales> = rollup
            .into_iter()
            .map(|(category, (count, revenue))| CategorySales {
                category: category.to_string(),
                count,
                revenue,
            })
            .collect();

        categories.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        categories.truncate(10);
        for category in &mut categories {
            category.revenue = category.revenue.round_dp(2);
        }
        categories
    }

    /// Ranks products by units sold descending and keeps the top 20. The
    /// sort is stable, so equal sellers keep their input order. Revenue is
    /// left unrounded here; this projection is not a display boundary.
    fn top_products(&self, products: &[ProductRecord]) -> Vec<ProductSales> {
        let mut ranked: Vec<&ProductRecord> = products.iter().collect();
        ranked.sort_by(|a, b| b.sold_count.cmp(&a.sold_count));
        ranked.truncate(20);

        ranked
            .into_iter()
            .map(|product| ProductSales {
                id: product.id,
                title: product.title.clone(),
                sales: product.sold_count,
                revenue: product.revenue(),
                rating: product.rating_or_default(),
            })
            .collect()
    }

    /// Buckets window orders by calendar month. Buckets are keyed by the
    /// (year, month) pair so ordering stays chronological across year
    /// boundaries; the "Jan 2024" label is presentation only.
    fn monthly_revenue(&self, orders: &[OrderRecord]) -> Vec<MonthlyRevenue> {
        let mut buckets: BTreeMap<(i32, u32), (String, Decimal, usize)> = BTreeMap::new();
        for order in orders {
            let key = (order.created_at.year(), order.created_at.month());
            let entry = buckets.entry(key).or_insert_with(|| {
                (
                    order.created_at.format("%b %Y").to_string(),
                    Decimal::ZERO,
                    0,
                )
            });
            entry.1 += order.total;
            entry.2 += 1;
        }

        buckets
            .into_values()
            .map(|(month, revenue, orders)| MonthlyRevenue {
                month,
                revenue: revenue.round_dp(2),
                orders,
            })
            .collect()
    }

    /// Per-category conversion and order-value signal. Orders carry no
    /// category, so the window order count and the global average order
    /// value stand in for category-attributed figures (see DESIGN.md).
    fn category_performance(
        &self,
        products: &[ProductRecord],
        orders: &[OrderRecord],
    ) -> Vec<CategoryPerformance> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for product in products {
            *counts.entry(product.category_label()).or_insert(0) += 1;
        }

        let order_count = orders.len();
        let order_revenue: Decimal = orders.iter().map(|o| o.total).sum();
        let avg_order_value = if order_count == 0 {
            Decimal::ZERO
        } else {
            (order_revenue / Decimal::from(order_count as u64)).round_dp(2)
        };

        counts
            .into_iter()
            .map(|(category, product_count)| CategoryPerformance {
                category: category.to_string(),
                // product_count is at least 1 for any emitted category.
                conversion_rate: order_count as f64 / product_count as f64 * 100.0,
                avg_order_value,
            })
            .collect()
    }

    /// The top 10 sellers with their full metric bundle attached.
    fn best_performing_products(&self, products: &[ProductRecord]) -> Vec<ProductInsight> {
        let mut ranked: Vec<&ProductRecord> = products.iter().collect();
        ranked.sort_by(|a, b| b.sold_count.cmp(&a.sold_count));
        ranked.truncate(10);

        ranked
            .into_iter()
            .map(|product| ProductInsight {
                id: product.id,
                title: product.title.clone(),
                metrics: ProductMetrics {
                    sales: product.sold_count,
                    revenue: product.revenue(),
                    rating: product.rating_or_default(),
                    reviews: product.review_count,
                    profit_margin: product.margin_or_default(),
                    category: product.category_label().to_string(),
                },
            })
            .collect()
    }

    /// Scores each category against a first-match decision tree and keeps
    /// the 5 highest-potential opportunities.
    fn category_opportunities(&self, products: &[ProductRecord]) -> Vec<CategoryOpportunity> {
        struct CategoryStats {
            count: usize,
            rating_sum: f64,
            sales_sum: i64,
        }

        let mut rollup: BTreeMap<&str, CategoryStats> = BTreeMap::new();
        for product in products {
            let stats = rollup
                .entry(product.category_label())
                .or_insert(CategoryStats {
                    count: 0,
                    rating_sum: 0.0,
                    sales_sum: 0,
                });
            stats.count += 1;
            stats.rating_sum += product.rating_or_default();
            stats.sales_sum += product.sold_count as i64;
        }

        let mut opportunities: Vec<CategoryOpportunity> = rollup
            .into_iter()
            .map(|(category, stats)| {
                let avg_rating = stats.rating_sum / stats.count as f64;
                let avg_sales = stats.sales_sum as f64 / stats.count as f64;

                // First match wins.
                let (opportunity, potential) = if avg_rating < 4.0 && stats.count > 5 {
                    ("Improve product quality and customer satisfaction", 0.8)
                } else if avg_sales < 10.0 && stats.count > 3 {
                    ("Increase marketing and visibility", 0.7)
                } else if stats.count < 5 {
                    ("Expand product range in this category", 0.9)
                } else {
                    ("Maintain current performance", 0.3)
                };

                CategoryOpportunity {
                    category: category.to_string(),
                    opportunity: opportunity.to_string(),
                    potential,
                }
            })
            .collect();

        opportunities.sort_by(|a, b| b.potential.total_cmp(&a.potential));
        opportunities.truncate(5);
        opportunities
    }

    /// Scores seasonal demand for the current season: a product whose tags
    /// or category contain a seasonal keyword (case-insensitive substring)
    /// contributes its units sold once.
    fn seasonal_trends(&self, products: &[ProductRecord], season: Season) -> Vec<SeasonalTrend> {
        let keywords = season.keywords();
        let mut score: i64 = 0;

        for product in products {
            let category = product.category_label().to_lowercase();
            let matched = keywords.iter().any(|keyword| {
                category.contains(keyword)
                    || product
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(keyword))
            });
            if matched {
                score += product.sold_count as i64;
            }
        }

        let trend = if score > 100 {
            "Strong seasonal demand"
        } else {
            "Moderate seasonal demand"
        };

        vec![SeasonalTrend {
            season,
            trend: trend.to_string(),
            impact: (score as f64 / 100.0).min(1.0),
        }]
    }

    /// Totals profit across the catalog and ranks the 5 most profitable
    /// categories. All monetary outputs are rounded to 2 decimal places.
    fn profit_analysis(&self, products: &[ProductRecord]) -> ProfitAnalysis {
        let mut total_profit = Decimal::ZERO;
        let mut total_revenue = Decimal::ZERO;
        let mut rollup: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();

        for product in products {
            let revenue = product.revenue();
            let profit = revenue * product.margin_or_default() / Decimal::ONE_HUNDRED;
            total_profit += profit;
            total_revenue += revenue;

            let entry = rollup
                .entry(product.category_label())
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += profit;
            entry.1 += revenue;
        }

        let profit_margin = if total_revenue.is_zero() {
            Decimal::ZERO
        } else {
            (total_profit / total_revenue * Decimal::ONE_HUNDRED).round_dp(2)
        };

        let mut top_profit_categories: Vec<CategoryProfit> = rollup
            .into_iter()
            .map(|(category, (profit, revenue))| CategoryProfit {
                category: category.to_string(),
                profit: profit.round_dp(2),
                margin: if revenue.is_zero() {
                    Decimal::ZERO
                } else {
                    (profit / revenue * Decimal::ONE_HUNDRED).round_dp(2)
                },
            })
            .collect();

        top_profit_categories.sort_by(|a, b| b.profit.cmp(&a.profit));
        top_profit_categories.truncate(5);

        ProfitAnalysis {
            total_profit: total_profit.round_dp(2),
            profit_margin,
            top_profit_categories,
        }
    }

    /// Evaluates the four recommendation rules independently; every rule
    /// that matches appends an entry, in rule order. This is deliberately
    /// not a priority cascade.
    fn recommendations(&self, products: &[ProductRecord]) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        let low_rated = products
            .iter()
            .filter(|p| p.rating_or_default() < 4.0 && p.review_count > 5)
            .count();
        if low_rated > 0 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Product,
                title: "Improve Product Quality".to_string(),
                description: format!(
                    "{low_rated} products have ratings below 4.0. Consider improving quality or finding better suppliers."
                ),
                impact: Impact::High,
                action: "Review and improve low-rated products".to_string(),
            });
        }

        let mut category_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for product in products {
            *category_counts.entry(product.category_label()).or_insert(0) += 1;
        }
        let sparse_categories = category_counts.values().filter(|&&count| count < 5).count();
        if sparse_categories > 0 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Category,
                title: "Expand Product Categories".to_string(),
                description: format!(
                    "{sparse_categories} categories have fewer than 5 products. Consider expanding these categories."
                ),
                impact: Impact::Medium,
                action: "Add more products to under-represented categories".to_string(),
            });
        }

        if !products.is_empty() {
            let margin_sum: Decimal = products.iter().map(|p| p.margin_or_default()).sum();
            let mean_margin = margin_sum / Decimal::from(products.len() as u64);
            if mean_margin < Decimal::from(25u32) {
                let pct = mean_margin.to_f64().unwrap_or(0.0);
                recommendations.push(Recommendation {
                    kind: RecommendationKind::Pricing,
                    title: "Optimize Pricing Strategy".to_string(),
                    description: format!(
                        "Current average profit margin is {pct:.1}%. Consider adjusting prices for better profitability."
                    ),
                    impact: Impact::High,
                    action: "Review and adjust product pricing".to_string(),
                });
            }
        }

        let hidden_gems = products
            .iter()
            .filter(|p| p.sold_count < 5 && p.rating_or_default() >= 4.0)
            .count();
        if hidden_gems > 0 {
            recommendations.push(Recommendation {
                kind: RecommendationKind::Marketing,
                title: "Boost Product Visibility".to_string(),
                description: format!(
                    "{hidden_gems} high-rated products have low sales. Consider marketing campaigns to increase visibility."
                ),
                impact: Impact::Medium,
                action: "Implement marketing campaigns for high-quality, low-visibility products"
                    .to_string(),
            });
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn product(category: &str, price: Decimal, sold_count: i32) -> ProductRecord {
        ProductRecord {
            id: Uuid::new_v4(),
            title: format!("{category} item"),
            category: Some(category.to_string()),
            price,
            sold_count,
            rating: None,
            review_count: 0,
            profit_margin: None,
            tags: vec![],
            created_at: Utc::now(),
        }
    }

    fn healthy(category: &str, price: Decimal, sold_count: i32) -> ProductRecord {
        // Rated and margined so no recommendation rule fires by accident.
        let mut p = product(category, price, sold_count);
        p.rating = Some(4.5);
        p.review_count = 10;
        p.profit_margin = Some(dec!(30));
        p
    }

    fn order(total: Decimal, created_at: DateTime<Utc>) -> OrderRecord {
        OrderRecord {
            id: Uuid::new_v4(),
            customer_id: None,
            total,
            status: "delivered".to_string(),
            created_at,
        }
    }

    fn window_start() -> DateTime<Utc> {
        Utc::now() - Duration::days(7)
    }

    #[test]
    fn empty_inputs_yield_zeroed_report() {
        let report = AnalyticsEngine::new().build_report(&[], &[], &[], window_start());

        assert_eq!(report.overview.total_products, 0);
        assert_eq!(report.overview.total_orders, 0);
        assert_eq!(report.overview.total_revenue, Decimal::ZERO);
        assert_eq!(report.overview.total_customers, 0);
        assert_eq!(report.overview.average_rating, 0.0);
        assert_eq!(report.overview.total_reviews, 0);
        assert!(report.trends.top_categories.is_empty());
        assert!(report.trends.top_products.is_empty());
        assert!(report.trends.monthly_revenue.is_empty());
        assert!(report.trends.category_performance.is_empty());
        assert!(report.insights.best_performing_products.is_empty());
        assert!(report.insights.category_opportunities.is_empty());
        assert!(report.insights.seasonal_trends.is_empty());
        assert_eq!(report.insights.profit_analysis.total_profit, Decimal::ZERO);
        assert_eq!(report.insights.profit_analysis.profit_margin, Decimal::ZERO);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn top_categories_ranked_by_revenue() {
        let products = vec![
            product("A", dec!(10), 5),
            product("B", dec!(20), 1),
        ];
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let top = &report.trends.top_categories;
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].category, "A");
        assert_eq!(top[0].count, 1);
        assert_eq!(top[0].revenue, dec!(50));
        assert_eq!(top[1].category, "B");
        assert_eq!(top[1].count, 1);
        assert_eq!(top[1].revenue, dec!(20));
    }

    #[test]
    fn top_categories_capped_at_ten() {
        let products: Vec<ProductRecord> = (0..14)
            .map(|i| product(&format!("Cat{i:02}"), dec!(10), i))
            .collect();
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let top = &report.trends.top_categories;
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].category, "Cat13");
        assert_eq!(top[9].category, "Cat04");
    }

    #[test]
    fn top_category_revenue_rounded_to_two_decimals() {
        let products = vec![product("A", dec!(3.333), 3)]; // 9.999 raw
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        assert_eq!(report.trends.top_categories[0].revenue, dec!(10.00));
        // The product projection is not a display boundary and stays raw.
        assert_eq!(report.trends.top_products[0].revenue, dec!(9.999));
    }

    #[test]
    fn top_products_capped_at_twenty_with_stable_ties() {
        let mut products = Vec::new();
        for i in 0..25 {
            let mut p = product("Gadgets", dec!(10), 7);
            p.title = format!("P{i:02}");
            products.push(p);
        }
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let top = &report.trends.top_products;
        assert_eq!(top.len(), 20);
        // Equal sellers keep input order.
        assert_eq!(top[0].title, "P00");
        assert_eq!(top[19].title, "P19");
    }

    #[test]
    fn monthly_revenue_sorts_chronologically_across_years() {
        let orders = vec![
            order(dec!(30), Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
            order(dec!(10), Utc.with_ymd_and_hms(2023, 12, 5, 0, 0, 0).unwrap()),
            order(dec!(20), Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            order(dec!(5), Utc.with_ymd_and_hms(2023, 12, 20, 0, 0, 0).unwrap()),
        ];
        let report = AnalyticsEngine::new().build_report(&[], &orders, &[], window_start());

        let months = &report.trends.monthly_revenue;
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].month, "Dec 2023");
        assert_eq!(months[0].revenue, dec!(15));
        assert_eq!(months[0].orders, 2);
        assert_eq!(months[1].month, "Jan 2024");
        assert_eq!(months[2].month, "Feb 2024");
    }

    #[test]
    fn category_performance_guards_zero_orders() {
        let products = vec![product("A", dec!(10), 1), product("A", dec!(10), 2)];
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let perf = &report.trends.category_performance;
        assert_eq!(perf.len(), 1);
        assert_eq!(perf[0].conversion_rate, 0.0);
        assert_eq!(perf[0].avg_order_value, Decimal::ZERO);
    }

    #[test]
    fn category_performance_uses_window_order_count() {
        let products = vec![
            product("A", dec!(10), 1),
            product("A", dec!(10), 1),
            product("B", dec!(10), 1),
        ];
        let orders = vec![
            order(dec!(30), Utc::now()),
            order(dec!(10), Utc::now()),
        ];
        let report =
            AnalyticsEngine::new().build_report(&products, &orders, &[], window_start());

        let perf = &report.trends.category_performance;
        // Alphabetical category order.
        assert_eq!(perf[0].category, "A");
        assert_eq!(perf[0].conversion_rate, 100.0); // 2 orders / 2 products
        assert_eq!(perf[1].category, "B");
        assert_eq!(perf[1].conversion_rate, 200.0); // 2 orders / 1 product
        assert_eq!(perf[0].avg_order_value, dec!(20));
    }

    #[test]
    fn healthy_categories_fall_into_maintain_branch() {
        let mut products = Vec::new();
        for category in ["Audio", "Garden"] {
            for _ in 0..5 {
                products.push(healthy(category, dec!(10), 20));
            }
        }
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let opportunities = &report.insights.category_opportunities;
        assert_eq!(opportunities.len(), 2);
        for opportunity in opportunities {
            assert_eq!(opportunity.opportunity, "Maintain current performance");
            assert_eq!(opportunity.potential, 0.3);
        }
    }

    #[test]
    fn opportunity_branches_first_match_wins() {
        let mut products = Vec::new();
        // 6 poorly rated products: quality branch (0.8) despite low sales.
        for _ in 0..6 {
            let mut p = product("Quality", dec!(10), 1);
            p.rating = Some(3.0);
            products.push(p);
        }
        // 4 well-rated slow sellers: marketing branch (0.7).
        for _ in 0..4 {
            let mut p = product("Sleepy", dec!(10), 2);
            p.rating = Some(4.5);
            products.push(p);
        }
        // 2 products only: expansion branch (0.9).
        for _ in 0..2 {
            products.push(healthy("Thin", dec!(10), 20));
        }
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let opportunities = &report.insights.category_opportunities;
        assert_eq!(opportunities.len(), 3);
        assert_eq!(opportunities[0].category, "Thin");
        assert_eq!(opportunities[0].potential, 0.9);
        assert_eq!(opportunities[1].category, "Quality");
        assert_eq!(opportunities[1].potential, 0.8);
        assert_eq!(opportunities[2].category, "Sleepy");
        assert_eq!(opportunities[2].potential, 0.7);
    }

    #[test]
    fn opportunities_capped_at_five() {
        let products: Vec<ProductRecord> = (0..8)
            .map(|i| healthy(&format!("Cat{i}"), dec!(10), 20))
            .collect();
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let opportunities = &report.insights.category_opportunities;
        assert_eq!(opportunities.len(), 5);
        // Single-product categories all hit the expansion branch.
        assert!(opportunities.iter().all(|o| o.potential == 0.9));
    }

    #[test]
    fn profit_defaults_margin_and_guards_zero_revenue() {
        // Margin unset (defaults to 20) but nothing sold: zero everywhere.
        let products = vec![product("A", dec!(10), 0), product("B", dec!(25), 0)];
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let profit = &report.insights.profit_analysis;
        assert_eq!(profit.total_profit, Decimal::ZERO);
        assert_eq!(profit.profit_margin, Decimal::ZERO);
        assert!(profit
            .top_profit_categories
            .iter()
            .all(|c| c.profit == Decimal::ZERO && c.margin == Decimal::ZERO));
    }

    #[test]
    fn profit_analysis_ranks_and_rounds() {
        let mut a = product("A", dec!(10), 10); // revenue 100
        a.profit_margin = Some(dec!(30)); // profit 30
        let b = product("B", dec!(5), 2); // revenue 10, default margin 20 -> profit 2
        let report =
            AnalyticsEngine::new().build_report(&[a, b], &[], &[], window_start());

        let profit = &report.insights.profit_analysis;
        assert_eq!(profit.total_profit, dec!(32));
        assert_eq!(profit.profit_margin, dec!(29.09)); // 32 / 110 * 100
        assert_eq!(profit.top_profit_categories[0].category, "A");
        assert_eq!(profit.top_profit_categories[0].profit, dec!(30));
        assert_eq!(profit.top_profit_categories[0].margin, dec!(30));
        assert_eq!(profit.top_profit_categories[1].margin, dec!(20));
    }

    #[test]
    fn single_low_rated_product_triggers_one_quality_recommendation() {
        let mut products: Vec<ProductRecord> =
            (0..4).map(|_| healthy("Gear", dec!(10), 10)).collect();
        let mut weak = healthy("Gear", dec!(10), 10);
        weak.rating = Some(3.5);
        products.push(weak);

        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.kind, RecommendationKind::Product);
        assert_eq!(rec.impact, Impact::High);
        assert!(rec.description.starts_with("1 products have ratings below 4.0"));
    }

    #[test]
    fn recommendation_rules_evaluate_independently_in_rule_order() {
        let mut sour = product("Lonely", dec!(10), 10);
        sour.rating = Some(3.0);
        sour.review_count = 10;
        let mut gem = product("Lonely", dec!(10), 2);
        gem.rating = Some(4.8);
        // Margins left unset: mean defaults to 20, under the 25 threshold.
        let products = vec![sour, gem];

        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let kinds: Vec<RecommendationKind> =
            report.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::Product,
                RecommendationKind::Category,
                RecommendationKind::Pricing,
                RecommendationKind::Marketing,
            ]
        );
        let pricing = &report.recommendations[2];
        assert_eq!(pricing.impact, Impact::High);
        assert!(pricing.description.contains("20.0%"));
    }

    #[test]
    fn seasonal_signal_scores_keyword_matches() {
        // Tags cover every season's keyword list, so the test holds
        // regardless of the wall-clock season.
        let all_season_tags: Vec<String> = [
            "light", "fresh", "outdoor", "garden", "cool", "beach", "vacation", "warm", "cozy",
            "indoor", "autumn", "winter",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let mut strong = healthy("Misc", dec!(10), 250);
        strong.tags = all_season_tags.clone();
        let report =
            AnalyticsEngine::new().build_report(&[strong], &[], &[], window_start());
        let trend = &report.insights.seasonal_trends[0];
        assert_eq!(trend.trend, "Strong seasonal demand");
        assert_eq!(trend.impact, 1.0);

        let mut moderate = healthy("Misc", dec!(10), 50);
        moderate.tags = all_season_tags;
        let report =
            AnalyticsEngine::new().build_report(&[moderate], &[], &[], window_start());
        let trend = &report.insights.seasonal_trends[0];
        assert_eq!(trend.trend, "Moderate seasonal demand");
        assert_eq!(trend.impact, 0.5);
    }

    #[test]
    fn unmatched_products_leave_a_zero_impact_signal() {
        let products = vec![healthy("Plain", dec!(10), 500)];
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let trend = &report.insights.seasonal_trends[0];
        assert_eq!(trend.trend, "Moderate seasonal demand");
        assert_eq!(trend.impact, 0.0);
    }

    #[test]
    fn overview_counts_distinct_customers_and_rounds_revenue() {
        let repeat = Uuid::new_v4();
        let mut orders = vec![
            order(dec!(10.005), Utc::now()),
            order(dec!(20), Utc::now()),
            order(dec!(30), Utc::now()),
        ];
        orders[0].customer_id = Some(repeat);
        orders[1].customer_id = Some(repeat);
        orders[2].customer_id = Some(Uuid::new_v4());
        orders.push(order(dec!(5), Utc::now())); // guest checkout

        let reviews = vec![ReviewRecord {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            rating: 5.0,
            created_at: Utc::now(),
        }];
        let products = vec![healthy("Gear", dec!(10), 10), healthy("Gear", dec!(10), 10)];

        let report =
            AnalyticsEngine::new().build_report(&products, &orders, &reviews, window_start());

        assert_eq!(report.overview.total_orders, 4);
        assert_eq!(report.overview.total_customers, 2);
        assert_eq!(report.overview.total_revenue, dec!(65.00)); // 65.005 rounds down
        assert_eq!(report.overview.total_reviews, 1);
        assert_eq!(report.overview.average_rating, 4.5);
    }

    #[test]
    fn best_performers_carry_default_margin_in_metrics() {
        let products = vec![product("Gear", dec!(10), 3)];
        let report =
            AnalyticsEngine::new().build_report(&products, &[], &[], window_start());

        let best = &report.insights.best_performing_products;
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].metrics.profit_margin, dec!(20));
        assert_eq!(best[0].metrics.category, "Gear");
        assert_eq!(best[0].metrics.revenue, dec!(30));
    }

    #[test]
    fn identical_inputs_produce_identical_reports_modulo_timestamp() {
        let products = vec![
            healthy("Audio", dec!(19.99), 42),
            product("Garden", dec!(7.50), 3),
        ];
        let orders = vec![order(dec!(27.49), Utc::now())];
        let ws = window_start();

        let engine = AnalyticsEngine::new();
        let first = engine.build_report(&products, &orders, &[], ws);
        let second = engine.build_report(&products, &orders, &[], ws);

        assert_eq!(first.overview, second.overview);
        assert_eq!(first.trends, second.trends);
        assert_eq!(first.insights, second.insights);
        assert_eq!(first.recommendations, second.recommendations);
        assert_eq!(first.window_start, second.window_start);
    }
}
