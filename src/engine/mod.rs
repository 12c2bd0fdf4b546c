pub mod aggregator;
pub mod config;
pub mod forecast;
pub mod health;
pub mod pipeline;
pub mod ranker;
pub mod solver;
