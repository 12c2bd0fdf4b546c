// src/io/reporting.rs

use crate::engine::ranker::projected_stockout_date;
use crate::error::Result;
use crate::model::eoq::EoqResult;
use crate::model::restock::{Priority, RestockRecommendation};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize)]
struct RecommendationRow<'a> {
    product_id: &'a str,
    product_name: &'a str,
    /// Blank when the product is not selling.
    days_until_stockout: Option<f64>,
    stockout_date: Option<NaiveDate>,
    recommended_qty: u64,
    priority: Priority,
}

#[derive(Debug, Serialize)]
struct EoqRow<'a> {
    product_id: &'a str,
    eoq_quantity: f64,
    reorder_point: f64,
    safety_stock: f64,
    annual_holding_cost: f64,
    annual_ordering_cost: f64,
    total_annual_cost: f64,
    max_stock_level: f64,
    min_stock_level: f64,
    average_inventory: f64,
}

impl<'a> EoqRow<'a> {
    fn new(product_id: &'a str, r: &EoqResult) -> Self {
        Self {
            product_id,
            eoq_quantity: round2(r.eoq_quantity),
            reorder_point: round2(r.reorder_point),
            safety_stock: round2(r.safety_stock),
            annual_holding_cost: round2(r.annual_holding_cost),
            annual_ordering_cost: round2(r.annual_ordering_cost),
            total_annual_cost: round2(r.total_annual_cost),
            max_stock_level: round2(r.max_stock_level),
            min_stock_level: round2(r.min_stock_level),
            average_inventory: round2(r.average_inventory),
        }
    }
}

/// Writes ranked recommendations as CSV, projecting stockout dates from `as_of`.
pub fn write_recommendations_to<W: Write>(
    writer: W,
    recommendations: &[RestockRecommendation],
    as_of: NaiveDate,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for rec in recommendations {
        let finite = rec.days_until_stockout.is_finite();
        wtr.serialize(RecommendationRow {
            product_id: &rec.product_id,
            product_name: &rec.product_name,
            days_until_stockout: finite.then(|| round2(rec.days_until_stockout)),
            stockout_date: projected_stockout_date(as_of, rec.days_until_stockout),
            recommended_qty: rec.recommended_qty,
            priority: rec.priority,
        })?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

/// Writes the restock recommendations to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "out/restock_recommendations.csv").
/// * `recommendations` - Ranked output of the restock ranker.
/// * `as_of` - Date the stock figures refer to.
pub fn write_recommendations(
    file_path: impl AsRef<Path>,
    recommendations: &[RestockRecommendation],
    as_of: NaiveDate,
) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_recommendations_to(file, recommendations, as_of)?;
    info!(rows = recommendations.len(), path = %path.display(), "wrote restock recommendations");
    Ok(())
}

/// Writes one EOQ row per product, rounded to cents for presentation.
pub fn write_eoq_results_to<W: Write>(writer: W, results: &[(String, EoqResult)]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (product_id, result) in results {
        wtr.serialize(EoqRow::new(product_id, result))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the EOQ results to a CSV file.
pub fn write_eoq_results(file_path: impl AsRef<Path>, results: &[(String, EoqResult)]) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_eoq_results_to(file, results)?;
    info!(rows = results.len(), path = %path.display(), "wrote EOQ results");
    Ok(())
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
