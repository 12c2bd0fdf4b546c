// src/engine/forecast.rs

//! Short-horizon demand forecasts from a period series (e.g. daily totals).

use crate::engine::config::ForecastMethod;
use crate::error::{EoqError, Result};
use serde::Serialize;
use tracing::debug;

/// Smoothing factor used by `forecast` for the exponential method.
pub const DEFAULT_ALPHA: f64 = 0.3;
/// Window used by `forecast` for the moving-average method.
pub const DEFAULT_SMA_PERIODS: usize = 3;
/// Two-sided 95% band width in standard deviations.
const BAND_Z: f64 = 1.96;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandForecast {
    pub forecasts: Vec<f64>,
    pub trend: f64,
    pub base_forecast: f64,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Means of every `periods`-long window. Series shorter than one window are
/// returned unchanged.
pub fn simple_moving_average(data: &[f64], periods: usize) -> Result<Vec<f64>> {
    if periods == 0 {
        return Err(EoqError::param("periods", "must be at least 1"));
    }
    if data.len() < periods {
        return Ok(data.to_vec());
    }
    Ok(data
        .windows(periods)
        .map(|w| w.iter().sum::<f64>() / periods as f64)
        .collect())
}

/// One-step-ahead exponential smoothing.
///
/// f[0] = x[0], f[i] = alpha * x[i-1] + (1 - alpha) * f[i-1]
pub fn exponential_smoothing(data: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(EoqError::param(
            "alpha",
            format!("must be between 0 and 1, got {alpha}"),
        ));
    }
    let Some(&first) = data.first() else {
        return Ok(Vec::new());
    };

    let mut smoothed = Vec::with_capacity(data.len());
    smoothed.push(first);
    for i in 1..data.len() {
        let next = alpha * data[i - 1] + (1.0 - alpha) * smoothed[i - 1];
        smoothed.push(next);
    }
    Ok(smoothed)
}

/// Projects `periods_ahead` future periods from a base level plus a linear
/// trend, with a band of +/- 1.96 standard deviations of the history.
/// Forecasts and lower bounds are floored at 0.
pub fn forecast(data: &[f64], periods_ahead: usize, method: ForecastMethod) -> Result<DemandForecast> {
    let (&first, &last) = match (data.first(), data.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(EoqError::EmptyDataset),
    };
    if periods_ahead == 0 {
        return Err(EoqError::param("periods_ahead", "must be at least 1"));
    }

    let base_forecast = match method {
        ForecastMethod::MovingAverage if data.len() >= DEFAULT_SMA_PERIODS => {
            last_of(simple_moving_average(data, DEFAULT_SMA_PERIODS)?, last)
        }
        ForecastMethod::MovingAverage => last,
        ForecastMethod::Exponential => last_of(exponential_smoothing(data, DEFAULT_ALPHA)?, last),
    };

    let trend = (last - first) / data.len() as f64;
    let forecasts: Vec<f64> = (1..=periods_ahead)
        .map(|i| (base_forecast + trend * i as f64).max(0.0))
        .collect();

    let half_width = population_std_dev(data) * BAND_Z;
    let lower = forecasts.iter().map(|f| (f - half_width).max(0.0)).collect();
    let upper = forecasts.iter().map(|f| f + half_width).collect();

    debug!(?method, periods_ahead, base_forecast, trend, "forecast demand");
    Ok(DemandForecast {
        forecasts,
        trend,
        base_forecast,
        lower,
        upper,
    })
}

fn last_of(series: Vec<f64>, fallback: f64) -> f64 {
    series.last().copied().unwrap_or(fallback)
}

fn population_std_dev(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
