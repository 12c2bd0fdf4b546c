// src/model/sales.rs

use chrono::NaiveDate;
use serde::Serialize;

/// A single dated sale. Produced by the import step, consumed by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesRecord {
    pub quantity: f64,
    pub date: NaiveDate,
}

impl SalesRecord {
    pub fn new(quantity: f64, date: NaiveDate) -> Self {
        Self { quantity, date }
    }
}

/// A sale tagged with the product it belongs to.
///
/// Imports that carry a product column produce these; the per-product window
/// statistics are built from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSale {
    pub product_id: String,
    pub product_name: String,
    pub quantity: f64,
    pub date: NaiveDate,
}

impl ProductSale {
    pub fn as_sales_record(&self) -> SalesRecord {
        SalesRecord::new(self.quantity, self.date)
    }
}

/// Inclusive first/last sale date of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Aggregate demand derived from a batch of sales records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandMetrics {
    pub total_quantity: f64,
    pub average_daily: f64,
    pub annual_demand: f64,
    pub days_of_data: u32,
    pub date_range: DateRange,
}
