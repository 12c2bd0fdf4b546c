// src/engine/ranker.rs

//! Per-product restock recommendations, ranked by urgency.

use crate::engine::config::RestockPolicy;
use crate::error::{EoqError, Result};
use crate::model::restock::{Priority, ProductDailyStat, RestockRecommendation};
use crate::strategy::implementations::FixedDaysCoverPolicy;
use crate::strategy::optimization::{economic_order_quantity, DAYS_PER_YEAR};
use crate::strategy::traits::{SafetyStockContext, SafetyStockPolicy};
use chrono::{Days, NaiveDate};
use tracing::{debug, info};

/// Builds one recommendation per product and sorts them by ascending days
/// until stockout. Products that are not selling (`+inf`) come last; ties keep
/// input order.
pub fn rank(stats: &[ProductDailyStat], policy: &RestockPolicy) -> Result<Vec<RestockRecommendation>> {
    policy.validate()?;
    let buffer = FixedDaysCoverPolicy::new(policy.safety_stock_days);

    let mut recommendations = stats
        .iter()
        .map(|stat| recommend(stat, policy, &buffer))
        .collect::<Result<Vec<_>>>()?;

    recommendations.sort_by(|a, b| a.days_until_stockout.total_cmp(&b.days_until_stockout));

    let urgent = recommendations
        .iter()
        .filter(|r| r.priority == Priority::High)
        .count();
    info!(products = recommendations.len(), urgent, "ranked restock recommendations");
    Ok(recommendations)
}

/// The most urgent product, if it needs restocking now.
pub fn immediate_restock<'a>(
    ranked: &'a [RestockRecommendation],
    policy: &RestockPolicy,
) -> Option<&'a RestockRecommendation> {
    ranked.first().filter(|top| {
        top.priority == Priority::High || top.days_until_stockout <= policy.urgent_within_days
    })
}

/// Calendar date on which stock runs out, counting whole days from `as_of`.
/// `None` when the product is not selling.
pub fn projected_stockout_date(as_of: NaiveDate, days_until_stockout: f64) -> Option<NaiveDate> {
    if !days_until_stockout.is_finite() || days_until_stockout < 0.0 {
        return None;
    }
    as_of.checked_add_days(Days::new(days_until_stockout.floor() as u64))
}

fn recommend(
    stat: &ProductDailyStat,
    policy: &RestockPolicy,
    buffer: &dyn SafetyStockPolicy,
) -> Result<RestockRecommendation> {
    if !stat.daily_rate.is_finite() || stat.daily_rate < 0.0 {
        return Err(EoqError::param(
            "dailyRate",
            format!("product {}: must be 0 or greater, got {}", stat.product_id, stat.daily_rate),
        ));
    }
    let on_hand = stat.last_sold_qty.unwrap_or(0.0);
    if !on_hand.is_finite() || on_hand < 0.0 {
        return Err(EoqError::input(
            None,
            format!("product {}: last sold quantity {on_hand} is invalid", stat.product_id),
        ));
    }

    let rate = stat.daily_rate;
    let days_until_stockout = if rate > 0.0 { on_hand / rate } else { f64::INFINITY };

    let eoq = economic_order_quantity(rate * DAYS_PER_YEAR, policy.ordering_cost, policy.holding_cost);
    let safety_units = buffer.safety_stock(&SafetyStockContext {
        daily_demand: rate,
        lead_time_days: policy.lead_time_days,
        // flat days of cover ignores the service level
        confidence_level: 0.5,
    });
    let base_needed = (rate * policy.lead_time_days + safety_units).ceil();
    let shortfall = base_needed - on_hand.ceil();
    let recommended_qty = shortfall.max(eoq.ceil()).max(0.0) as u64;

    let priority = match stat.priority {
        Some(Priority::High) => Priority::High,
        _ if days_until_stockout <= policy.urgent_within_days => Priority::High,
        hint => hint.unwrap_or(Priority::Low),
    };

    debug!(
        product = %stat.product_id,
        days_until_stockout,
        recommended_qty,
        %priority,
        "restock recommendation"
    );

    Ok(RestockRecommendation {
        product_id: stat.product_id.clone(),
        product_name: stat.product_name.clone(),
        days_until_stockout,
        recommended_qty,
        priority,
    })
}
