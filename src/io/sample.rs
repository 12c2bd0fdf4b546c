// src/io/sample.rs

//! Synthetic sales datasets for demos and tests.

use crate::model::sales::ProductSale;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// One product line in a generated dataset.
#[derive(Debug, Clone)]
pub struct SampleProduct {
    pub product_id: String,
    pub product_name: String,
    /// Mean units sold per day.
    pub mean_daily: f64,
    /// Standard deviation of daily units (volatility).
    pub std_dev: f64,
}

impl SampleProduct {
    pub fn new(id: &str, name: &str, mean_daily: f64, std_dev: f64) -> Self {
        Self {
            product_id: id.to_string(),
            product_name: name.to_string(),
            mean_daily,
            std_dev,
        }
    }
}

/// A small lighting-store catalogue with a spread of selling speeds.
pub fn lighting_catalogue() -> Vec<SampleProduct> {
    vec![
        SampleProduct::new("101", "LED Bulb 9W", 18.0, 4.0),
        SampleProduct::new("102", "LED Bulb 12W", 11.0, 3.0),
        SampleProduct::new("205", "Panel Light 2x2", 4.0, 1.5),
        SampleProduct::new("310", "Track Light Head", 2.0, 1.0),
        SampleProduct::new("412", "Crystal Chandelier", 0.3, 0.5),
    ]
}

/// Generates one sale per product per day for `days` days starting at `start`.
///
/// Daily quantities are drawn from each product's Normal distribution, rounded
/// to whole units and clamped at 0; zero-unit days are skipped. The same seed
/// always yields the same dataset.
pub fn generate_sales(
    products: &[SampleProduct],
    start: NaiveDate,
    days: u32,
    seed: u64,
) -> Vec<ProductSale> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sales = Vec::with_capacity(products.len() * days as usize);

    for offset in 0..days {
        let Some(date) = start.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        for product in products {
            // A non-positive or NaN deviation degenerates to constant demand.
            let quantity = match Normal::new(product.mean_daily, product.std_dev) {
                Ok(normal) => normal.sample(&mut rng),
                Err(_) => product.mean_daily,
            };

            // 1. Round to nearest integer.
            // 2. Clamp negative numbers to 0 (demand cannot be negative).
            let quantity = quantity.round().max(0.0);
            if quantity > 0.0 {
                sales.push(ProductSale {
                    product_id: product.product_id.clone(),
                    product_name: product.product_name.clone(),
                    quantity,
                    date,
                });
            }
        }
    }

    sales
}
