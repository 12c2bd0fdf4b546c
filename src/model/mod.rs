pub mod eoq;
pub mod restock;
pub mod sales;
