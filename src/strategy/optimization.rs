// src/strategy/optimization.rs

//! Closed-form inventory-theory formulas shared by the solver and the ranker.
//!
//! Everything here is a plain function of its arguments. Parameter validation
//! lives with the callers that know the field names; the helpers that take
//! user-facing percentages validate those themselves.

use crate::error::{EoqError, Result};

/// Days per year used to move between daily and annual demand.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Default carrying cost as a share of unit cost.
pub const DEFAULT_HOLDING_PCT: f64 = 0.25;
/// Default fixed cost of placing one order.
pub const DEFAULT_FIXED_ORDER_COST: f64 = 50.0;
/// Default handling cost per item on an order.
pub const DEFAULT_VARIABLE_ORDER_COST: f64 = 0.5;

/// Economic Order Quantity.
///
/// Formula: EOQ = sqrt(2 * D * S / H)
///
/// Where D is annual demand, S the cost per order and H the holding cost per
/// unit per year. Returns 0 when demand is 0. `holding_cost` must be positive.
pub fn economic_order_quantity(annual_demand: f64, ordering_cost: f64, holding_cost: f64) -> f64 {
    if annual_demand <= 0.0 || ordering_cost <= 0.0 {
        return 0.0;
    }
    ((2.0 * annual_demand * ordering_cost) / holding_cost).sqrt()
}

/// Annual ordering cost, `(D / Q) * S`, guarded so that Q = 0 costs nothing.
pub fn annual_ordering_cost(annual_demand: f64, order_quantity: f64, ordering_cost: f64) -> f64 {
    if order_quantity > 0.0 {
        (annual_demand / order_quantity) * ordering_cost
    } else {
        0.0
    }
}

/// Annual holding cost of a cycle stock of `order_quantity`, `(Q / 2) * H`.
pub fn annual_holding_cost(order_quantity: f64, holding_cost: f64) -> f64 {
    (order_quantity / 2.0) * holding_cost
}

/// Annual carrying cost per unit from a unit price and a carrying percentage.
/// Typical carrying cost is 20-30% of unit cost.
pub fn holding_cost_from_unit_cost(unit_cost: f64, holding_pct: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&holding_pct) {
        return Err(EoqError::param(
            "holding_pct",
            format!("must be between 0 and 1, got {holding_pct}"),
        ));
    }
    Ok(unit_cost * holding_pct)
}

/// Cost of placing one order of `items_per_order` items.
pub fn ordering_cost_for(items_per_order: u32, fixed_cost: f64, variable_cost_per_item: f64) -> f64 {
    fixed_cost + items_per_order as f64 * variable_cost_per_item
}

/// Z-score for a one-sided service level: the `confidence` quantile of the
/// standard normal distribution.
///
/// The caller must ensure `0 < confidence < 1`.
pub fn z_score(confidence: f64) -> f64 {
    let x0 = inverse_normal_cdf(confidence);
    // One Newton step against the CDF tightens the 4.5e-4 starting error.
    let density = (-0.5 * x0 * x0).exp() / (2.0 * std::f64::consts::PI).sqrt();
    if density <= f64::EPSILON {
        return x0;
    }
    x0 - (normal_cdf(x0) - confidence) / density
}

/// Approximate Inverse Cumulative Distribution Function (Quantile function) for Standard Normal Distribution.
///
/// Based on Abramowitz and Stegun formula 26.2.23.
/// The absolute error is less than 4.5e-4.
fn inverse_normal_cdf(p: f64) -> f64 {
    // Handle edge cases
    if p >= 1.0 {
        return 5.0;
    } // Cap at reasonable sigma
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    // Formula is valid for 0 < p <= 0.5
    // If p > 0.5, we use 1-p and negate the result
    let q = if p < 0.5 { p } else { 1.0 - p };

    let t = (-2.0 * q.ln()).sqrt();

    let c0 = 2.515517;
    let c1 = 0.802853;
    let c2 = 0.010328;

    let d1 = 1.432788;
    let d2 = 0.189269;
    let d3 = 0.001308;

    let numerator = c0 + c1 * t + c2 * t * t;
    let denominator = 1.0 + d1 * t + d2 * t * t + d3 * t * t * t;

    let x = t - (numerator / denominator);

    if p < 0.5 {
        -x
    } else {
        x
    }
}

/// Standard normal CDF via the error function.
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Error function, Abramowitz and Stegun formula 7.1.26 (|error| < 1.5e-7).
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let t = 1.0 / (1.0 + p * x);
    let poly = ((((a5 * t + a4) * t + a3) * t + a2) * t + a1) * t;

    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eoq_textbook_value() {
        // sqrt(2 * 1000 * 100 / 50) = sqrt(4000)
        let q = economic_order_quantity(1000.0, 100.0, 50.0);
        assert!((q - 4000f64.sqrt()).abs() < 1e-12);
        assert!((q - 63.25).abs() < 0.01);
    }

    #[test]
    fn eoq_zero_demand_is_zero() {
        assert_eq!(economic_order_quantity(0.0, 100.0, 50.0), 0.0);
        assert_eq!(annual_ordering_cost(0.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn z_score_matches_reference_quantiles() {
        let cases = [
            (0.50, 0.0),
            (0.90, 1.281_551_6),
            (0.95, 1.644_853_6),
            (0.975, 1.959_964_0),
            (0.99, 2.326_347_9),
            (0.10, -1.281_551_6),
        ];
        for (p, expected) in cases {
            let z = z_score(p);
            assert!((z - expected).abs() < 1e-5, "z({p}) = {z}, expected {expected}");
        }
    }

    #[test]
    fn normal_cdf_is_symmetric() {
        for x in [0.3, 1.0, 1.7, 2.5] {
            assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn holding_cost_percentage_is_bounded() {
        assert!((holding_cost_from_unit_cost(40.0, DEFAULT_HOLDING_PCT).unwrap() - 10.0).abs() < 1e-12);
        let err = holding_cost_from_unit_cost(40.0, 1.5).unwrap_err();
        assert_eq!(err.field(), Some("holding_pct"));
    }

    #[test]
    fn ordering_cost_adds_variable_part() {
        let cost = ordering_cost_for(20, DEFAULT_FIXED_ORDER_COST, DEFAULT_VARIABLE_ORDER_COST);
        assert!((cost - 60.0).abs() < 1e-12);
    }
}
