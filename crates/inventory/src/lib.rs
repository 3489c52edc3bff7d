//! Inventory module: product catalog facts and the concurrent stock table.
//!
//! This crate knows nothing about orders; composing stock with the order
//! ledger is the placement workflow's job.

pub mod product;
pub mod stock;

pub use product::{Product, ProductDetails};
pub use stock::{StockAction, StockRecord, StockStore};
