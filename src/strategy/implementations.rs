// src/strategy/implementations.rs

use crate::strategy::optimization::z_score;
use crate::strategy::traits::{SafetyStockContext, SafetyStockPolicy};

// =========================================================================
// 1. Service Level Policy (z-score, Poisson variance)
// =========================================================================

/// Sizes safety stock from the service level.
///
/// Formula: SafetyStock = Z * sqrt(d * L)
///
/// No demand variance is supplied to the engine, so the lead-time standard
/// deviation is approximated as sqrt(d * L), i.e. demand is treated as Poisson.
/// A service level below 50% would give a negative buffer; that is clamped to 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceLevelPolicy;

impl ServiceLevelPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl SafetyStockPolicy for ServiceLevelPolicy {
    fn safety_stock(&self, context: &SafetyStockContext) -> f64 {
        let lead_time_demand = context.daily_demand * context.lead_time_days;
        if lead_time_demand <= 0.0 {
            return 0.0;
        }
        let sigma_l = lead_time_demand.sqrt();
        (z_score(context.confidence_level) * sigma_l).max(0.0)
    }
}

// =========================================================================
// 2. Fixed Days Cover Policy
// =========================================================================

/// Holds a flat number of days of demand as buffer, rounded up to whole units.
///
/// Formula: SafetyStock = ceil(d * days)
///
/// Ignores the service level entirely. This is the rule the restock ranker uses.
#[derive(Debug, Clone, Copy)]
pub struct FixedDaysCoverPolicy {
    days: f64,
}

impl FixedDaysCoverPolicy {
    pub fn new(days: f64) -> Self {
        Self { days: days.max(0.0) }
    }
}

impl SafetyStockPolicy for FixedDaysCoverPolicy {
    fn safety_stock(&self, context: &SafetyStockContext) -> f64 {
        (context.daily_demand * self.days).ceil().max(0.0)
    }
}

// =========================================================================
// 3. Coefficient of Variation Policy
// =========================================================================

/// Estimates daily demand deviation as a fixed share of the mean.
///
/// Formula: SafetyStock = Z * (d * cv) * sqrt(L)
///
/// With `cv = 0.2` this reproduces the analytics service's historical estimate.
#[derive(Debug, Clone, Copy)]
pub struct CoefficientOfVariationPolicy {
    cv: f64,
}

impl CoefficientOfVariationPolicy {
    pub const DEFAULT_CV: f64 = 0.2;

    pub fn new(cv: f64) -> Self {
        Self { cv: cv.max(0.0) }
    }
}

impl Default for CoefficientOfVariationPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CV)
    }
}

impl SafetyStockPolicy for CoefficientOfVariationPolicy {
    fn safety_stock(&self, context: &SafetyStockContext) -> f64 {
        if context.daily_demand <= 0.0 || context.lead_time_days <= 0.0 {
            return 0.0;
        }
        let daily_sigma = context.daily_demand * self.cv;
        (z_score(context.confidence_level) * daily_sigma * context.lead_time_days.sqrt()).max(0.0)
    }
}
