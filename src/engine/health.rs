// src/engine/health.rs

//! Stock health classification, turnover and ABC value analysis.

use crate::error::{EoqError, Result};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockStatus {
    Critical,
    Low,
    Normal,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: StockStatus,
    pub risk_level: RiskLevel,
    /// Days the current stock lasts at the current usage; `+inf` when idle.
    pub days_of_stock: f64,
    pub stockout_risk_pct: f64,
    pub recommendation: String,
}

/// Classifies current stock against the levels produced by the EOQ solver.
///
/// Thresholds are checked in order: at or below safety stock is critical, at or
/// below the reorder point is low, at or above `reorder_point + eoq` is high.
pub fn analyze_health(
    current_stock: f64,
    daily_usage: f64,
    reorder_point: f64,
    safety_stock: f64,
    eoq: f64,
) -> Result<HealthReport> {
    if daily_usage.is_nan() || daily_usage < 0.0 {
        return Err(EoqError::input(None, format!("daily usage {daily_usage} is negative")));
    }
    if current_stock.is_nan() || current_stock < 0.0 {
        return Err(EoqError::input(None, format!("current stock {current_stock} is negative")));
    }

    let days_of_stock = if daily_usage > 0.0 {
        current_stock / daily_usage
    } else {
        f64::INFINITY
    };

    let (status, risk_level) = if current_stock <= safety_stock {
        (StockStatus::Critical, RiskLevel::High)
    } else if current_stock <= reorder_point {
        (StockStatus::Low, RiskLevel::Medium)
    } else if current_stock >= reorder_point + eoq {
        (StockStatus::High, RiskLevel::Low)
    } else {
        (StockStatus::Normal, RiskLevel::Low)
    };

    let capacity = reorder_point + eoq;
    let stockout_risk_pct = if current_stock <= 0.0 {
        100.0
    } else if capacity > 0.0 {
        ((1.0 - current_stock / capacity) * 100.0).max(0.0)
    } else {
        0.0
    };

    Ok(HealthReport {
        status,
        risk_level,
        days_of_stock,
        stockout_risk_pct,
        recommendation: recommendation(status, reorder_point, eoq),
    })
}

fn recommendation(status: StockStatus, reorder_point: f64, eoq: f64) -> String {
    let eoq = eoq.trunc() as i64;
    let rop = reorder_point.trunc() as i64;
    match status {
        StockStatus::Critical => {
            format!("URGENT: Order {eoq} units immediately to reach optimal stock levels")
        }
        StockStatus::Low => format!(
            "CAUTION: Place order for {eoq} units. Current stock below reorder point ({rop})"
        ),
        StockStatus::Normal => format!(
            "Maintain current stock. Next order recommended when stock reaches {rop}"
        ),
        StockStatus::High => {
            "Excess inventory detected. Consider reducing order quantity or frequency".to_string()
        }
    }
}

/// How many times the average inventory turns over in a year. Zero when there
/// is no inventory.
pub fn turnover_ratio(annual_demand: f64, average_inventory: f64) -> f64 {
    if average_inventory <= 0.0 {
        return 0.0;
    }
    annual_demand / average_inventory
}

/// A product's yearly consumption value inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AbcItem {
    pub product_id: String,
    pub annual_demand: f64,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AbcClasses {
    pub a_items: Vec<String>,
    pub b_items: Vec<String>,
    pub c_items: Vec<String>,
}

/// Splits products into A/B/C classes by consumption value
/// (`annual_demand * unit_cost`).
///
/// Items are taken in descending value order; each is classed by the
/// cumulative share of value *before* it is added: under 80% is A, under 95%
/// is B, the rest C.
pub fn abc_analysis(items: &[AbcItem]) -> AbcClasses {
    let mut valued: Vec<(&str, f64)> = items
        .iter()
        .map(|i| (i.product_id.as_str(), i.annual_demand * i.unit_cost))
        .collect();
    valued.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let total: f64 = valued.iter().map(|(_, v)| v).sum();
    let mut classes = AbcClasses::default();
    if total <= 0.0 {
        classes.c_items = items.iter().map(|i| i.product_id.clone()).collect();
        return classes;
    }

    let mut cumulative = 0.0;
    for (id, value) in valued {
        let share = cumulative / total * 100.0;
        let bucket = if share < 80.0 {
            &mut classes.a_items
        } else if share < 95.0 {
            &mut classes.b_items
        } else {
            &mut classes.c_items
        };
        bucket.push(id.to_string());
        cumulative += value;
    }
    classes
}
