use eoq_engine::engine::config::AnalyticsConfig;
use eoq_engine::engine::pipeline::run_analysis;
use eoq_engine::io::reporting::{write_eoq_results, write_recommendations};
use eoq_engine::io::sales::load_sales_file;
use eoq_engine::io::sample::{generate_sales, lighting_catalogue};
use eoq_engine::{aggregate, EoqError, Priority};
use std::io::Write;

// Two weeks of branch sales: bulbs move fast, chandeliers barely move.
const BRANCH_CSV: &str = "\
product_id,product_name,quantity,sale_date
101,LED Bulb 9W,12,2024-05-01
412,Crystal Chandelier,1,2024-05-01
101,LED Bulb 9W,9,2024-05-03
205,Panel Light 2x2,4,2024-05-04
101,LED Bulb 9W,15,2024-05-07
205,Panel Light 2x2,3,2024-05-09
101,LED Bulb 9W,11,2024-05-12
205,Panel Light 2x2,6,2024-05-14
101,LED Bulb 9W,14,2024-05-14
";

fn write_temp_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn import_analyze_and_export() {
    let csv = write_temp_csv(BRANCH_CSV);
    let import = load_sales_file(csv.path()).unwrap();
    assert_eq!(import.records.len(), 9);
    assert!(import.has_products());

    let config = AnalyticsConfig::default();
    let report = run_analysis(&import.records, &import.product_sales, &config).unwrap();

    // 75 units over 14 days
    assert_eq!(report.metrics.total_quantity, 75.0);
    assert_eq!(report.metrics.days_of_data, 14);
    assert_eq!(report.product_eoq.len(), 3);

    // Bulbs: 14 units sold on the last day at 61/14 per day -> ~3.2 days cover.
    let top = &report.recommendations[0];
    assert_eq!(top.product_id, "101");
    assert_eq!(top.priority, Priority::High);
    assert!((top.days_until_stockout - 14.0 * 14.0 / 61.0).abs() < 1e-9);

    // The chandelier sold once, two weeks ago; it has the longest cover.
    assert_eq!(report.recommendations.last().unwrap().product_id, "412");

    let out = tempfile::tempdir().unwrap();
    let rec_path = out.path().join("restock_recommendations.csv");
    let eoq_path = out.path().join("eoq_result.csv");
    write_recommendations(&rec_path, &report.recommendations, report.metrics.date_range.end).unwrap();
    write_eoq_results(&eoq_path, &report.product_eoq).unwrap();

    let recs = std::fs::read_to_string(rec_path).unwrap();
    assert_eq!(recs.lines().count(), 4);
    assert!(recs.lines().nth(1).unwrap().starts_with("101,LED Bulb 9W,"));

    let eoq = std::fs::read_to_string(eoq_path).unwrap();
    assert!(eoq.starts_with("product_id,eoq_quantity,reorder_point,safety_stock,"));
    assert_eq!(eoq.lines().count(), 4);
}

#[test]
fn bad_row_rejects_whole_import() {
    let csv = write_temp_csv("quantity,date\n4,2024-01-01\n-2,2024-01-02\n");
    match load_sales_file(csv.path()) {
        Err(EoqError::InvalidInput { line, .. }) => assert_eq!(line, Some(3)),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn net_negative_product_is_invalid_input() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let records = [eoq_engine::SalesRecord::new(5.0, date)];
    let sale = |qty: f64| eoq_engine::ProductSale {
        product_id: "a".to_string(),
        product_name: "Track Light".to_string(),
        quantity: qty,
        date,
    };
    let result = run_analysis(&records, &[sale(5.0), sale(-30.0)], &AnalyticsConfig::default());
    assert!(matches!(result, Err(EoqError::InvalidInput { .. })));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_sales_file("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, EoqError::Io(_)));
}

#[test]
fn sample_dataset_drives_full_pipeline() {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let sales = generate_sales(&lighting_catalogue(), start, 60, 11);
    let records: Vec<_> = sales.iter().map(|s| s.as_sales_record()).collect();

    let report = run_analysis(&records, &sales, &AnalyticsConfig::default()).unwrap();
    assert_eq!(report.metrics, aggregate(&records).unwrap());
    assert_eq!(report.recommendations.len(), lighting_catalogue().len());

    // Same inputs, same outputs.
    let again = run_analysis(&records, &sales, &AnalyticsConfig::default()).unwrap();
    assert_eq!(report, again);
}
