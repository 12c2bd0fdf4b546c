// src/model/eoq.rs

use serde::{Deserialize, Serialize};

/// Parameters for a single EOQ evaluation.
///
/// Costs are per year except `ordering_cost_per_order`. `confidence_level` is
/// the target probability of not stocking out during the lead time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EoqInput {
    pub annual_demand: f64,
    pub holding_cost_per_unit_per_year: f64,
    pub ordering_cost_per_order: f64,
    pub unit_cost: f64,
    pub lead_time_days: f64,
    pub confidence_level: f64,
}

/// Output of the EOQ solver.
///
/// The derived levels always satisfy:
/// - `max_stock_level == reorder_point + eoq_quantity`
/// - `min_stock_level == safety_stock`
/// - `average_inventory == eoq_quantity / 2 + safety_stock`
/// - `total_annual_cost == annual_holding_cost + annual_ordering_cost`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EoqResult {
    pub eoq_quantity: f64,
    pub reorder_point: f64,
    pub safety_stock: f64,
    pub annual_holding_cost: f64,
    pub annual_ordering_cost: f64,
    pub total_annual_cost: f64,
    pub max_stock_level: f64,
    pub min_stock_level: f64,
    pub average_inventory: f64,
}

impl EoqResult {
    /// Builds a result from the independently computed quantities, deriving the
    /// rest so the invariants hold by construction.
    pub(crate) fn from_parts(
        eoq_quantity: f64,
        reorder_point: f64,
        safety_stock: f64,
        annual_holding_cost: f64,
        annual_ordering_cost: f64,
    ) -> Self {
        Self {
            eoq_quantity,
            reorder_point,
            safety_stock,
            annual_holding_cost,
            annual_ordering_cost,
            total_annual_cost: annual_holding_cost + annual_ordering_cost,
            max_stock_level: reorder_point + eoq_quantity,
            min_stock_level: safety_stock,
            average_inventory: eoq_quantity / 2.0 + safety_stock,
        }
    }
}
