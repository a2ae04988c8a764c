use crate::{error::AppError, fallback::fallback_report, AppState};
use analytics::{AnalyticsEngine, AnalyticsReport};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use core_types::{OrderRecord, ProductRecord, ReviewRecord, TimeRange};
use database::DbError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing;

#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    /// Raw query value; unknown ranges fall back to the configured default
    /// rather than rejecting the request.
    #[serde(rename = "timeRange")]
    pub time_range: Option<String>,
}

/// The success envelope wrapped around every analytics payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEnvelope {
    pub success: bool,
    pub data: AnalyticsReport,
    pub timestamp: DateTime<Utc>,
    pub time_range: TimeRange,
}

/// # GET /api/products
/// Fetches the active catalog as-is.
pub async fn get_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductRecord>>, AppError> {
    let products = state.repo.get_active_products().await?;
    Ok(Json(products))
}

/// # GET /api/analytics?timeRange=7d
/// Builds an analytics report for the requested window. When the data
/// source is unavailable the fixed sample report is served instead of an
/// error, so the dashboard always renders.
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsParams>,
) -> Json<AnalyticsEnvelope> {
    let time_range = params
        .time_range
        .as_deref()
        .map(TimeRange::parse_or_default)
        .unwrap_or(state.default_time_range);
    let window_start = time_range.window_start(Utc::now());

    let report = match fetch_snapshot(&state, window_start).await {
        Ok((products, orders, reviews)) => {
            AnalyticsEngine::new().build_report(&products, &orders, &reviews, window_start)
        }
        Err(error) => {
            tracing::warn!(error = ?error, "Data source unavailable; serving fallback report.");
            fallback_report(window_start)
        }
    };

    Json(AnalyticsEnvelope {
        success: true,
        data: report,
        timestamp: Utc::now(),
        time_range,
    })
}

/// Gathers the three window-bounded collections the engine consumes.
async fn fetch_snapshot(
    state: &AppState,
    window_start: DateTime<Utc>,
) -> Result<(Vec<ProductRecord>, Vec<OrderRecord>, Vec<ReviewRecord>), DbError> {
    let products = state.repo.get_active_products().await?;
    let orders = state.repo.get_orders_since(window_start).await?;
    let reviews = state.repo.get_reviews_since(window_start).await?;
    Ok((products, orders, reviews))
}
