use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use eoq_engine::engine::config::AnalyticsConfig;
use eoq_engine::engine::health::analyze_health;
use eoq_engine::engine::pipeline::run_analysis;
use eoq_engine::engine::ranker::{immediate_restock, projected_stockout_date};
use eoq_engine::io::sales::{load_sales_file, SalesImport};
use eoq_engine::io::{reporting, sample};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: eoq-engine [SALES_CSV] [--config FILE] [--out DIR] [--seed N]";

struct Args {
    sales_csv: Option<PathBuf>,
    config: Option<PathBuf>,
    out_dir: PathBuf,
    seed: u64,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        sales_csv: None,
        config: None,
        out_dir: PathBuf::from("."),
        seed: 42,
    };
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().context(USAGE)?.into()),
            "--out" => args.out_dir = it.next().context(USAGE)?.into(),
            "--seed" => args.seed = it.next().context(USAGE)?.parse().context("--seed expects an integer")?,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown flag {flag}\n{USAGE}"),
            path => args.sales_csv = Some(path.into()),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eoq_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== EOQ Inventory Analytics ===");
    let args = parse_args()?;

    // 1. SETUP CONFIGURATION
    let config = match &args.config {
        Some(path) => AnalyticsConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };

    // 2. LOAD SALES
    // Without a file we fall back to a seeded synthetic lighting-store dataset.
    let import = match &args.sales_csv {
        Some(path) => load_sales_file(path)
            .with_context(|| format!("importing sales from {}", path.display()))?,
        None => {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid sample start date")?;
            let product_sales =
                sample::generate_sales(&sample::lighting_catalogue(), start, 90, args.seed);
            println!("No sales file given; generated {} sample rows.", product_sales.len());
            SalesImport {
                records: product_sales.iter().map(|s| s.as_sales_record()).collect(),
                product_sales,
            }
        }
    };

    // 3. RUN ANALYSIS
    let report = run_analysis(&import.records, &import.product_sales, &config)?;

    // 4. EXPORT RESULTS
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let as_of = report.metrics.date_range.end;

    let mut eoq_rows = vec![("ALL".to_string(), report.eoq)];
    eoq_rows.extend(report.product_eoq.iter().cloned());
    reporting::write_eoq_results(args.out_dir.join("eoq_result.csv"), &eoq_rows)?;
    reporting::write_recommendations(
        args.out_dir.join("restock_recommendations.csv"),
        &report.recommendations,
        as_of,
    )?;

    // 5. PRINT SUMMARY
    let m = &report.metrics;
    println!("\n=== Demand ===");
    println!(
        "{} to {} ({} days): {:.0} units, {:.2}/day, {:.0}/year",
        m.date_range.start, m.date_range.end, m.days_of_data, m.total_quantity, m.average_daily, m.annual_demand
    );

    let e = &report.eoq;
    println!("\n=== EOQ ===");
    println!("Order quantity:   {:.2}", e.eoq_quantity);
    println!("Reorder point:    {:.2}", e.reorder_point);
    println!("Safety stock:     {:.2}", e.safety_stock);
    println!("Max / min stock:  {:.2} / {:.2}", e.max_stock_level, e.min_stock_level);
    println!(
        "Annual cost:      ${:.2} (holding ${:.2}, ordering ${:.2})",
        e.total_annual_cost, e.annual_holding_cost, e.annual_ordering_cost
    );

    let health = analyze_health(
        e.average_inventory,
        m.average_daily,
        e.reorder_point,
        e.safety_stock,
        e.eoq_quantity,
    )?;
    println!("At average inventory: {:?} - {}", health.status, health.recommendation);

    if !report.recommendations.is_empty() {
        println!("\n=== Restock ===");
        for rec in &report.recommendations {
            let when = projected_stockout_date(as_of, rec.days_until_stockout)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "[{:>6}] {:<24} out in {:>7.1} days ({}), order {}",
                rec.priority, rec.product_name, rec.days_until_stockout, when, rec.recommended_qty
            );
        }
        if let Some(top) = immediate_restock(&report.recommendations, &config.restock) {
            println!("Immediate restock: {} ({} units)", top.product_name, top.recommended_qty);
        }
    }

    println!("\n=== Forecast (next {} days) ===", report.forecast.forecasts.len());
    for (i, f) in report.forecast.forecasts.iter().enumerate() {
        println!(
            "Day +{}: {:.1} [{:.1}, {:.1}]",
            i + 1,
            f,
            report.forecast.lower[i],
            report.forecast.upper[i]
        );
    }

    println!(
        "\nResults written to {} (run at {}).",
        args.out_dir.display(),
        Local::now().format("%Y-%m-%d %H:%M")
    );
    Ok(())
}
