// src/strategy/traits.rs

use std::fmt::Debug;

/// Demand and service information a safety-stock rule may draw on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyStockContext {
    /// Average units sold per day.
    pub daily_demand: f64,
    /// Days between placing and receiving an order.
    pub lead_time_days: f64,
    /// Target probability of not stocking out during the lead time.
    pub confidence_level: f64,
}

/// Sizes the buffer stock held against demand variability.
///
/// We require `Send` + `Sync` so callers can evaluate branches in parallel.
pub trait SafetyStockPolicy: Debug + Send + Sync {
    /// Safety stock in units. Never negative.
    fn safety_stock(&self, context: &SafetyStockContext) -> f64;
}
