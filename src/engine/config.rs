// src/engine/config.rs

use crate::error::{EoqError, Result};
use crate::model::eoq::EoqInput;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cost and service defaults fed to the EOQ solver when the caller only
/// supplies demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostDefaults {
    pub holding_cost_per_unit_per_year: f64,
    pub ordering_cost_per_order: f64,
    pub unit_cost: f64,
    pub lead_time_days: f64,
    pub confidence_level: f64,
}

impl Default for CostDefaults {
    fn default() -> Self {
        Self {
            holding_cost_per_unit_per_year: 50.0,
            ordering_cost_per_order: 100.0,
            unit_cost: 25.0,
            lead_time_days: 7.0,
            confidence_level: 0.95,
        }
    }
}

impl CostDefaults {
    /// Pairs these defaults with a demand figure.
    pub fn eoq_input(&self, annual_demand: f64) -> EoqInput {
        EoqInput {
            annual_demand,
            holding_cost_per_unit_per_year: self.holding_cost_per_unit_per_year,
            ordering_cost_per_order: self.ordering_cost_per_order,
            unit_cost: self.unit_cost,
            lead_time_days: self.lead_time_days,
            confidence_level: self.confidence_level,
        }
    }
}

/// Policy constants for the per-product restock ranker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestockPolicy {
    pub lead_time_days: f64,
    pub safety_stock_days: f64,
    pub ordering_cost: f64,
    pub holding_cost: f64,
    /// Products running out within this many days are always high priority.
    pub urgent_within_days: f64,
}

impl Default for RestockPolicy {
    fn default() -> Self {
        Self {
            lead_time_days: 7.0,
            safety_stock_days: 7.0,
            ordering_cost: 100.0,
            holding_cost: 50.0,
            urgent_within_days: 7.0,
        }
    }
}

impl RestockPolicy {
    pub fn validate(&self) -> Result<()> {
        non_negative("lead_time_days", self.lead_time_days)?;
        non_negative("safety_stock_days", self.safety_stock_days)?;
        non_negative("ordering_cost", self.ordering_cost)?;
        non_negative("urgent_within_days", self.urgent_within_days)?;
        if !(self.holding_cost.is_finite() && self.holding_cost > 0.0) {
            return Err(EoqError::param(
                "holding_cost",
                format!("must be greater than 0, got {}", self.holding_cost),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    MovingAverage,
    #[default]
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    pub periods_ahead: usize,
    pub method: ForecastMethod,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            periods_ahead: 3,
            method: ForecastMethod::Exponential,
        }
    }
}

/// Top-level settings for an analytics run.
///
/// Every field has a default, so a config file only needs the values it
/// overrides:
///
/// ```toml
/// window_days = 14
///
/// [costs]
/// confidence_level = 0.9
///
/// [restock]
/// lead_time_days = 5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub costs: CostDefaults,
    pub restock: RestockPolicy,
    /// Length of the recent sales window used for per-product daily rates.
    pub window_days: u32,
    pub forecast: ForecastSettings,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            costs: CostDefaults::default(),
            restock: RestockPolicy::default(),
            window_days: 30,
            forecast: ForecastSettings::default(),
        }
    }
}

impl AnalyticsConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.restock.validate()?;
        if self.window_days == 0 {
            return Err(EoqError::param("window_days", "must be at least 1"));
        }
        if self.forecast.periods_ahead == 0 {
            return Err(EoqError::param("periods_ahead", "must be at least 1"));
        }
        // Demand is unknown until import; check the cost fields with a dummy value.
        crate::engine::solver::validate(&self.costs.eoq_input(1.0))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EoqError::param(field, format!("must be 0 or greater, got {value}")))
    }
}
