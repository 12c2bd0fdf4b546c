// src/engine/aggregator.rs

//! Reduces dated sales into demand figures.

use crate::error::{EoqError, Result};
use crate::model::restock::ProductDailyStat;
use crate::model::sales::{DateRange, DemandMetrics, ProductSale, SalesRecord};
use crate::strategy::optimization::DAYS_PER_YEAR;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use tracing::debug;

/// Longest dataset span, in days, that `daily_totals` will lay out as a series.
pub const MAX_SERIES_DAYS: u32 = 36_600;

/// Aggregates a batch of sales into total, daily and annualized demand.
///
/// `days_of_data` is the inclusive span between the first and last sale date,
/// so a single-day import counts as one day.
pub fn aggregate(records: &[SalesRecord]) -> Result<DemandMetrics> {
    let first = records.first().ok_or(EoqError::EmptyDataset)?;

    let mut total_quantity = 0.0;
    let mut start = first.date;
    let mut end = first.date;

    for (idx, record) in records.iter().enumerate() {
        check_quantity(record.quantity, idx)?;
        total_quantity += record.quantity;
        start = start.min(record.date);
        end = end.max(record.date);
    }

    let days_of_data = inclusive_days(start, end);
    let average_daily = total_quantity / days_of_data as f64;
    let annual_demand = average_daily * DAYS_PER_YEAR;

    debug!(
        records = records.len(),
        total_quantity,
        days_of_data,
        annual_demand,
        "aggregated sales"
    );

    Ok(DemandMetrics {
        total_quantity,
        average_daily,
        annual_demand,
        days_of_data,
        date_range: DateRange { start, end },
    })
}

/// Derives one `ProductDailyStat` per product from the last `window_days` of
/// sales.
///
/// The window ends on the latest sale date in `sales`. Within it, a product's
/// daily rate is its windowed total over the days actually observed: the
/// window length, or the inclusive span from the first sale in the dataset to
/// the window end when the data is shorter than the window. Its last sold
/// quantity is what it sold on its most recent sale date. Output is ordered by
/// product id.
pub fn product_daily_stats(sales: &[ProductSale], window_days: u32) -> Result<Vec<ProductDailyStat>> {
    if window_days == 0 {
        return Err(EoqError::param("window_days", "must be at least 1"));
    }
    let first = sales.first().ok_or(EoqError::EmptyDataset)?;
    let mut data_start = first.date;
    let mut window_end = first.date;
    for (idx, sale) in sales.iter().enumerate() {
        check_quantity(sale.quantity, idx)?;
        data_start = data_start.min(sale.date);
        window_end = window_end.max(sale.date);
    }
    let window_start = window_end
        .checked_sub_days(Days::new(u64::from(window_days - 1)))
        .unwrap_or(NaiveDate::MIN);
    let observed_days = inclusive_days(window_start.max(data_start), window_end);

    struct Tally<'a> {
        name: &'a str,
        total: f64,
        last_date: NaiveDate,
        last_qty: f64,
    }

    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for sale in sales.iter().filter(|s| s.date >= window_start) {
        let tally = tallies.entry(sale.product_id.as_str()).or_insert(Tally {
            name: sale.product_name.as_str(),
            total: 0.0,
            last_date: sale.date,
            last_qty: 0.0,
        });
        tally.total += sale.quantity;
        if sale.date > tally.last_date {
            tally.last_date = sale.date;
            tally.last_qty = sale.quantity;
        } else if sale.date == tally.last_date {
            tally.last_qty += sale.quantity;
        }
    }

    let stats: Vec<ProductDailyStat> = tallies
        .into_iter()
        .map(|(id, tally)| {
            ProductDailyStat::new(
                id,
                tally.name,
                Some(tally.last_qty),
                tally.total / f64::from(observed_days),
            )
        })
        .collect();

    debug!(
        products = stats.len(),
        observed_days,
        %window_start,
        %window_end,
        "derived product daily stats"
    );
    Ok(stats)
}

/// Total quantity per calendar day across the dataset span, first to last sale
/// date, with zero for days without sales.
///
/// Spans longer than `MAX_SERIES_DAYS` are rejected as `InvalidInput`; they
/// almost always come from a mistyped year.
pub fn daily_totals(records: &[SalesRecord]) -> Result<Vec<f64>> {
    let metrics = aggregate(records)?;
    if metrics.days_of_data > MAX_SERIES_DAYS {
        return Err(EoqError::input(
            None,
            format!(
                "sales span {} to {} covers {} days, more than {MAX_SERIES_DAYS}",
                metrics.date_range.start, metrics.date_range.end, metrics.days_of_data
            ),
        ));
    }
    let start = metrics.date_range.start;
    let mut totals = vec![0.0; metrics.days_of_data as usize];
    for record in records {
        let offset = (record.date - start).num_days() as usize;
        totals[offset] += record.quantity;
    }
    Ok(totals)
}

pub(crate) fn check_quantity(quantity: f64, idx: usize) -> Result<()> {
    if !quantity.is_finite() {
        return Err(EoqError::input(
            None,
            format!("record {idx}: quantity is not a finite number"),
        ));
    }
    if quantity < 0.0 {
        return Err(EoqError::input(
            None,
            format!("record {idx}: quantity {quantity} is negative"),
        ));
    }
    Ok(())
}

fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days() + 1;
    u32::try_from(span).unwrap_or(u32::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sale(id: &str, qty: f64, d: u32) -> ProductSale {
        ProductSale {
            product_id: id.to_string(),
            product_name: format!("Lamp {id}"),
            quantity: qty,
            date: day(d),
        }
    }

    #[test]
    fn two_consecutive_days() {
        let records = [SalesRecord::new(10.0, day(1)), SalesRecord::new(20.0, day(2))];
        let m = aggregate(&records).unwrap();
        assert_eq!(m.total_quantity, 30.0);
        assert_eq!(m.days_of_data, 2);
        assert_eq!(m.average_daily, 15.0);
        assert_eq!(m.annual_demand, 5475.0);
        assert_eq!(m.date_range, DateRange { start: day(1), end: day(2) });
    }

    #[test]
    fn single_day_counts_as_one() {
        let records = [SalesRecord::new(4.0, day(9)), SalesRecord::new(6.0, day(9))];
        let m = aggregate(&records).unwrap();
        assert_eq!(m.days_of_data, 1);
        assert_eq!(m.average_daily, 10.0);
    }

    #[test]
    fn unordered_input_finds_range() {
        let records = [
            SalesRecord::new(1.0, day(20)),
            SalesRecord::new(1.0, day(3)),
            SalesRecord::new(1.0, day(11)),
        ];
        let m = aggregate(&records).unwrap();
        assert_eq!(m.date_range.start, day(3));
        assert_eq!(m.date_range.end, day(20));
        assert_eq!(m.days_of_data, 18);
    }

    #[test]
    fn daily_totals_fill_gaps() {
        let records = [
            SalesRecord::new(2.0, day(4)),
            SalesRecord::new(1.0, day(1)),
            SalesRecord::new(3.0, day(4)),
        ];
        assert_eq!(daily_totals(&records).unwrap(), vec![1.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn empty_is_rejected() {
        assert!(matches!(aggregate(&[]), Err(EoqError::EmptyDataset)));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let records = [SalesRecord::new(5.0, day(1)), SalesRecord::new(-1.0, day(2))];
        assert!(matches!(aggregate(&records), Err(EoqError::InvalidInput { .. })));
    }

    #[test]
    fn nan_quantity_is_rejected() {
        let records = [SalesRecord::new(f64::NAN, day(1))];
        assert!(matches!(aggregate(&records), Err(EoqError::InvalidInput { .. })));
    }

    #[test]
    fn product_stats_use_trailing_window() {
        let sales = [
            sale("B", 100.0, 1), // outside a 10 day window ending on the 20th
            sale("B", 4.0, 15),
            sale("B", 6.0, 20),
            sale("A", 3.0, 12),
            sale("A", 2.0, 18),
            sale("A", 5.0, 18),
        ];
        let stats = product_daily_stats(&sales, 10).unwrap();
        assert_eq!(stats.len(), 2);

        assert_eq!(stats[0].product_id, "A");
        assert_eq!(stats[0].product_name, "Lamp A");
        assert_eq!(stats[0].last_sold_qty, Some(7.0));
        assert!((stats[0].daily_rate - 1.0).abs() < 1e-12);

        assert_eq!(stats[1].product_id, "B");
        assert_eq!(stats[1].last_sold_qty, Some(6.0));
        assert!((stats[1].daily_rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn product_stats_on_data_shorter_than_window() {
        // one week of 14 a day, analyzed with a 30 day window
        let sales: Vec<_> = (1..=7).map(|d| sale("A", 14.0, d)).collect();
        let stats = product_daily_stats(&sales, 30).unwrap();
        assert_eq!(stats[0].daily_rate, 14.0);
        assert_eq!(stats[0].last_sold_qty, Some(14.0));
    }

    #[test]
    fn late_starting_product_shares_dataset_span() {
        // B only starts selling on day 5 of a 10 day dataset
        let sales = [sale("A", 10.0, 1), sale("A", 10.0, 10), sale("B", 5.0, 5)];
        let stats = product_daily_stats(&sales, 30).unwrap();
        assert_eq!(stats[0].daily_rate, 2.0);
        assert_eq!(stats[1].daily_rate, 0.5);
    }

    #[test]
    fn daily_totals_reject_runaway_span() {
        let records = [
            SalesRecord::new(1.0, NaiveDate::from_ymd_opt(24, 5, 1).unwrap()),
            SalesRecord::new(1.0, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
        ];
        assert!(matches!(daily_totals(&records), Err(EoqError::InvalidInput { .. })));
    }

    #[test]
    fn product_stats_validate_inputs() {
        assert!(matches!(product_daily_stats(&[], 7), Err(EoqError::EmptyDataset)));
        let err = product_daily_stats(&[sale("A", 1.0, 1)], 0).unwrap_err();
        assert_eq!(err.field(), Some("window_days"));
        assert!(matches!(
            product_daily_stats(&[sale("A", -2.0, 1)], 7),
            Err(EoqError::InvalidInput { .. })
        ));
    }
}
