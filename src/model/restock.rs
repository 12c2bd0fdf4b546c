// src/model/restock.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.pad(s)
    }
}

/// Recent selling rate of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDailyStat {
    pub product_id: String,
    pub product_name: String,
    /// Quantity of the most recent sale. `None` when there is no history.
    pub last_sold_qty: Option<f64>,
    pub daily_rate: f64,
    /// Caller-supplied priority hint.
    pub priority: Option<Priority>,
}

impl ProductDailyStat {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        last_sold_qty: Option<f64>,
        daily_rate: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            last_sold_qty,
            daily_rate,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Restock advice for one product. `days_until_stockout` is `f64::INFINITY`
/// for products that are not selling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestockRecommendation {
    pub product_id: String,
    pub product_name: String,
    pub days_until_stockout: f64,
    pub recommended_qty: u64,
    pub priority: Priority,
}
