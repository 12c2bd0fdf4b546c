pub mod reporting;
pub mod sales;
pub mod sample;
