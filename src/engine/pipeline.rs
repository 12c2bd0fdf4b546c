// src/engine/pipeline.rs

use crate::engine::aggregator::{aggregate, daily_totals, product_daily_stats};
use crate::engine::config::AnalyticsConfig;
use crate::engine::forecast::{forecast, DemandForecast};
use crate::engine::ranker::rank;
use crate::engine::solver::{solve, solve_by_product};
use crate::error::Result;
use crate::model::eoq::EoqResult;
use crate::model::restock::RestockRecommendation;
use crate::model::sales::{DemandMetrics, ProductSale, SalesRecord};
use tracing::info;

/// Everything one analytics pass produces. Computed fresh on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub metrics: DemandMetrics,
    /// EOQ for the store-wide demand stream.
    pub eoq: EoqResult,
    /// EOQ per product, ordered by product id. Empty without product data.
    pub product_eoq: Vec<(String, EoqResult)>,
    /// Ranked by ascending days until stockout. Empty without product data.
    pub recommendations: Vec<RestockRecommendation>,
    pub forecast: DemandForecast,
}

/// Runs aggregate -> solve -> per-product stats -> rank -> forecast.
///
/// `product_sales` may be empty, in which case only the store-wide figures
/// are produced.
pub fn run_analysis(
    records: &[SalesRecord],
    product_sales: &[ProductSale],
    config: &AnalyticsConfig,
) -> Result<AnalyticsReport> {
    // PHASE 1: store-wide demand
    let metrics = aggregate(records)?;
    let eoq = solve(&config.costs.eoq_input(metrics.annual_demand))?;

    // PHASE 2: per-product restock advice
    let (product_eoq, recommendations) = if product_sales.is_empty() {
        (Vec::new(), Vec::new())
    } else {
        let product_eoq = solve_by_product(product_sales, metrics.days_of_data, &config.costs)?;
        let stats = product_daily_stats(product_sales, config.window_days)?;
        (product_eoq, rank(&stats, &config.restock)?)
    };

    // PHASE 3: forecast daily demand
    let series = daily_totals(records)?;
    let forecast = forecast(&series, config.forecast.periods_ahead, config.forecast.method)?;

    info!(
        records = records.len(),
        annual_demand = metrics.annual_demand,
        eoq = eoq.eoq_quantity,
        products = product_eoq.len(),
        "analysis complete"
    );

    Ok(AnalyticsReport {
        metrics,
        eoq,
        product_eoq,
        recommendations,
        forecast,
    })
}
