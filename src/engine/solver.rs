// src/engine/solver.rs

//! EOQ, safety stock and reorder point for a single demand stream.

use crate::engine::aggregator::check_quantity;
use crate::engine::config::CostDefaults;
use crate::error::{EoqError, Result};
use crate::model::eoq::{EoqInput, EoqResult};
use crate::model::sales::ProductSale;
use crate::strategy::implementations::ServiceLevelPolicy;
use crate::strategy::optimization::{
    annual_holding_cost, annual_ordering_cost, economic_order_quantity, DAYS_PER_YEAR,
};
use crate::strategy::traits::{SafetyStockContext, SafetyStockPolicy};
use std::collections::BTreeMap;
use tracing::debug;

/// Solves the classical EOQ model with service-level safety stock.
pub fn solve(input: &EoqInput) -> Result<EoqResult> {
    solve_with(input, &ServiceLevelPolicy::new())
}

/// Solves the EOQ model, sizing safety stock with `policy`.
pub fn solve_with(input: &EoqInput, policy: &dyn SafetyStockPolicy) -> Result<EoqResult> {
    validate(input)?;

    let eoq = economic_order_quantity(
        input.annual_demand,
        input.ordering_cost_per_order,
        input.holding_cost_per_unit_per_year,
    );

    let daily_demand = input.annual_demand / DAYS_PER_YEAR;
    let lead_time_demand = daily_demand * input.lead_time_days;

    let safety_stock = policy.safety_stock(&SafetyStockContext {
        daily_demand,
        lead_time_days: input.lead_time_days,
        confidence_level: input.confidence_level,
    });
    let reorder_point = lead_time_demand + safety_stock;

    let holding = annual_holding_cost(eoq, input.holding_cost_per_unit_per_year);
    let ordering = annual_ordering_cost(input.annual_demand, eoq, input.ordering_cost_per_order);

    let result = EoqResult::from_parts(eoq, reorder_point, safety_stock, holding, ordering);
    debug!(
        annual_demand = input.annual_demand,
        eoq = result.eoq_quantity,
        reorder_point = result.reorder_point,
        safety_stock = result.safety_stock,
        "solved EOQ"
    );
    Ok(result)
}

/// Runs the solver once per product.
///
/// Each product's annual demand is its total over the whole dataset span
/// (`days_of_data`, see `aggregate`) scaled to a year. Results are keyed and
/// ordered by product id.
pub fn solve_by_product(
    sales: &[ProductSale],
    days_of_data: u32,
    costs: &CostDefaults,
) -> Result<Vec<(String, EoqResult)>> {
    if sales.is_empty() {
        return Err(EoqError::EmptyDataset);
    }
    if days_of_data == 0 {
        return Err(EoqError::param("days_of_data", "must be at least 1"));
    }

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for (idx, sale) in sales.iter().enumerate() {
        check_quantity(sale.quantity, idx)?;
        *totals.entry(sale.product_id.as_str()).or_default() += sale.quantity;
    }

    totals
        .into_iter()
        .map(|(id, total)| {
            let annual_demand = total / f64::from(days_of_data) * DAYS_PER_YEAR;
            let result = solve(&costs.eoq_input(annual_demand))?;
            Ok((id.to_string(), result))
        })
        .collect()
}

/// Checks every field of `input` against its domain.
///
/// Annual demand may be zero (the result then has a zero order quantity);
/// every cost and the lead time must be strictly positive, and the confidence
/// level must lie strictly between 0 and 1.
pub fn validate(input: &EoqInput) -> Result<()> {
    if !input.annual_demand.is_finite() || input.annual_demand < 0.0 {
        return Err(EoqError::param(
            "annualDemand",
            format!("must be 0 or greater, got {}", input.annual_demand),
        ));
    }
    positive("holdingCostPerUnitPerYear", input.holding_cost_per_unit_per_year)?;
    positive("orderingCostPerOrder", input.ordering_cost_per_order)?;
    positive("unitCost", input.unit_cost)?;
    positive("leadTimeDays", input.lead_time_days)?;
    if !(input.confidence_level > 0.0 && input.confidence_level < 1.0) {
        return Err(EoqError::param(
            "confidenceLevel",
            format!("must be strictly between 0 and 1, got {}", input.confidence_level),
        ));
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EoqError::param(field, format!("must be greater than 0, got {value}")))
    }
}
