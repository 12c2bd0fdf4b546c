//! Economic Order Quantity analytics for retail stock.
//!
//! The engine turns dated sales into demand figures ([`engine::aggregator`]),
//! solves the EOQ / safety stock / reorder point model ([`engine::solver`]) and
//! ranks products by how soon they run out ([`engine::ranker`]). All engine
//! functions are pure: plain data in, plain data out. CSV import and export
//! live in [`io`].

pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod strategy;

pub use engine::aggregator::{aggregate, product_daily_stats};
pub use engine::config::{AnalyticsConfig, CostDefaults, RestockPolicy};
pub use engine::ranker::{immediate_restock, rank};
pub use engine::solver::{solve, solve_with};
pub use error::{EoqError, Result};
pub use model::eoq::{EoqInput, EoqResult};
pub use model::restock::{Priority, ProductDailyStat, RestockRecommendation};
pub use model::sales::{DateRange, DemandMetrics, ProductSale, SalesRecord};
