// src/io/sales.rs

//! CSV sales import.
//!
//! Expected columns (header names are matched case-insensitively):
//!   quantity                       required
//!   date | transaction_date | sale_date | timestamp | transactiondatetime | created_at
//!                                  first one present is used
//!   product_id | product | product_name
//!                                  optional; enables per-product analytics
//!
//! Rows are parsed strictly: a blank or malformed quantity or date rejects the
//! whole import with the offending line number.

use crate::error::{EoqError, Result};
use crate::model::sales::{ProductSale, SalesRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::info;

const DATE_COLUMNS: [&str; 6] = [
    "date",
    "transaction_date",
    "sale_date",
    "timestamp",
    "transactiondatetime",
    "created_at",
];

/// Parsed import: every row as a plain sales record, plus the product-tagged
/// rows when the file carries a product column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesImport {
    pub records: Vec<SalesRecord>,
    pub product_sales: Vec<ProductSale>,
}

impl SalesImport {
    pub fn has_products(&self) -> bool {
        !self.product_sales.is_empty()
    }
}

struct Columns {
    quantity: usize,
    date: usize,
    product_id: Option<usize>,
    product_name: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let quantity = find("quantity")
            .ok_or_else(|| EoqError::input(Some(1), "missing column: quantity"))?;
        let date = DATE_COLUMNS.iter().find_map(|c| find(*c)).ok_or_else(|| {
            EoqError::input(
                Some(1),
                format!("missing date column; provide one of: {}", DATE_COLUMNS.join(", ")),
            )
        })?;

        let product_id = find("product_id").or_else(|| find("product"));
        let product_name = find("product_name").or(product_id);
        let product_id = product_id.or(product_name);

        Ok(Self {
            quantity,
            date,
            product_id,
            product_name,
        })
    }
}

/// Load sales rows from a CSV reader.
pub fn load_sales<R: Read>(reader: R) -> Result<SalesImport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::locate(csv_reader.headers().map_err(row_error)?)?;
    let mut import = SalesImport::default();

    for (idx, row) in csv_reader.records().enumerate() {
        let row = row.map_err(row_error)?;
        let line = idx + 2;

        let quantity = parse_quantity(row.get(columns.quantity), line)?;
        let date = parse_date(row.get(columns.date), line)?;
        import.records.push(SalesRecord::new(quantity, date));

        if let Some(id_col) = columns.product_id {
            let product_id = row.get(id_col).unwrap_or("").to_string();
            if product_id.is_empty() {
                return Err(EoqError::input(Some(line), "product column is blank"));
            }
            let product_name = columns
                .product_name
                .and_then(|c| row.get(c))
                .filter(|name| !name.is_empty())
                .unwrap_or(product_id.as_str())
                .to_string();
            import.product_sales.push(ProductSale {
                product_id,
                product_name,
                quantity,
                date,
            });
        }
    }

    info!(
        rows = import.records.len(),
        with_products = import.has_products(),
        "imported sales data"
    );
    Ok(import)
}

/// Load sales rows from a CSV file path.
pub fn load_sales_file(path: impl AsRef<Path>) -> Result<SalesImport> {
    let file = std::fs::File::open(path)?;
    load_sales(file)
}

/// Ragged rows and invalid UTF-8 carry a position; report them against their
/// line like any other malformed row.
fn row_error(err: csv::Error) -> EoqError {
    let Some(line) = err.position().map(|pos| pos.line()) else {
        return EoqError::Csv(err);
    };
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => {
            format!("expected {expected_len} fields, found {len}")
        }
        csv::ErrorKind::Utf8 { .. } => "row is not valid UTF-8".to_string(),
        _ => err.to_string(),
    };
    EoqError::input(usize::try_from(line).ok(), reason)
}

fn parse_quantity(raw: Option<&str>, line: usize) -> Result<f64> {
    let raw = raw.unwrap_or("");
    if raw.is_empty() {
        return Err(EoqError::input(Some(line), "quantity is blank"));
    }
    let quantity: f64 = raw
        .parse()
        .map_err(|_| EoqError::input(Some(line), format!("quantity '{raw}' is not a number")))?;
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(EoqError::input(
            Some(line),
            format!("quantity '{raw}' must be a non-negative number"),
        ));
    }
    Ok(quantity)
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`,
/// RFC 3339 and `MM/DD/YYYY`.
fn parse_date(raw: Option<&str>, line: usize) -> Result<NaiveDate> {
    let raw = raw.unwrap_or("");
    if raw.is_empty() {
        return Err(EoqError::input(Some(line), "date is blank"));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(ts.date());
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Ok(date);
    }
    Err(EoqError::input(Some(line), format!("unrecognised date '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plain_quantity_and_date() {
        let csv = "quantity,date\n10,2024-01-01\n20,2024-01-02\n";
        let import = load_sales(csv.as_bytes()).unwrap();
        assert_eq!(import.records.len(), 2);
        assert_eq!(import.records[1], SalesRecord::new(20.0, ymd(2024, 1, 2)));
        assert!(!import.has_products());
    }

    #[test]
    fn alternative_date_column_and_formats() {
        let csv = "\
Quantity,transaction_date
1,2024-02-03 14:22:10
2,2024-02-04T08:00:00
3,2024-02-05T09:30:00+08:00
4,02/06/2024
";
        let import = load_sales(csv.as_bytes()).unwrap();
        let dates: Vec<_> = import.records.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![ymd(2024, 2, 3), ymd(2024, 2, 4), ymd(2024, 2, 5), ymd(2024, 2, 6)]
        );
    }

    #[test]
    fn product_columns_are_picked_up() {
        let csv = "\
product_id,product_name,quantity,date
101,LED Bulb 9W,5,2024-03-01
102,,2,2024-03-01
";
        let import = load_sales(csv.as_bytes()).unwrap();
        assert!(import.has_products());
        assert_eq!(import.product_sales[0].product_id, "101");
        assert_eq!(import.product_sales[0].product_name, "LED Bulb 9W");
        assert_eq!(import.product_sales[1].product_name, "102");
    }

    #[test]
    fn product_name_only() {
        let csv = "product,quantity,date\nDownlight,3,2024-03-01\n";
        let import = load_sales(csv.as_bytes()).unwrap();
        assert_eq!(import.product_sales[0].product_id, "Downlight");
        assert_eq!(import.product_sales[0].product_name, "Downlight");
    }

    #[test]
    fn missing_columns_fail() {
        let err = load_sales("qty,date\n1,2024-01-01\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("quantity"));

        let err = load_sales("quantity,day\n1,2024-01-01\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing date column"));
    }

    #[test]
    fn malformed_rows_fail_with_line() {
        let bad_qty = "quantity,date\n1,2024-01-01\nabc,2024-01-02\n";
        match load_sales(bad_qty.as_bytes()) {
            Err(EoqError::InvalidInput { line, .. }) => assert_eq!(line, Some(3)),
            other => panic!("unexpected {other:?}"),
        }

        let negative = "quantity,date\n-4,2024-01-01\n";
        assert!(matches!(
            load_sales(negative.as_bytes()),
            Err(EoqError::InvalidInput { line: Some(2), .. })
        ));

        let blank_date = "quantity,date\n4,\n";
        assert!(matches!(
            load_sales(blank_date.as_bytes()),
            Err(EoqError::InvalidInput { line: Some(2), .. })
        ));

        let bad_date = "quantity,date\n4,yesterday\n";
        assert!(load_sales(bad_date.as_bytes()).is_err());
    }

    #[test]
    fn ragged_row_fails_with_line() {
        let ragged = "quantity,date\n1,2024-01-01\n2,2024-01-02,extra\n";
        match load_sales(ragged.as_bytes()) {
            Err(EoqError::InvalidInput { line, reason }) => {
                assert_eq!(line, Some(3));
                assert!(reason.contains("expected 2 fields, found 3"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn non_utf8_row_is_invalid_input() {
        let bytes: &[u8] = b"quantity,date\n1,2024-01-01\n\xff,2024-01-02\n";
        match load_sales(bytes) {
            Err(EoqError::InvalidInput { line, reason }) => {
                assert!(line.is_some());
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
