//! Seed data loading for the stock table.
//!
//! The stores are volatile, so every process start rebuilds the stock table
//! from a JSON array of product rows:
//!
//! ```json
//! [{ "name": "Pen", "price": 1.5, "category": "Stationery", "added_quantity": 10 }]
//! ```
//!
//! Rows that do not deserialize are skipped and counted; any `id` on a row is
//! ignored because the store assigns identifiers.

use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{debug, warn};

use storefront_inventory::{ProductDetails, StockStore};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed file {} is not a JSON array of rows: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Parse product rows from `path`, returning the valid rows and the number skipped.
pub fn load_products(path: &Path) -> Result<(Vec<ProductDetails>, usize), SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let rows: Vec<JsonValue> = serde_json::from_str(&raw).map_err(|source| SeedError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    let mut products = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<ProductDetails>(row) {
            Ok(details) => products.push(details),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed product row");
                skipped += 1;
            }
        }
    }

    Ok((products, skipped))
}

/// Add every row to `store`, in order.
pub fn seed_stock(store: &StockStore, products: impl IntoIterator<Item = ProductDetails>) -> usize {
    let mut added = 0;
    for details in products {
        let record = store.add_product(details);
        debug!(product_id = %record.id, name = %record.product.name, "seeded product");
        added += 1;
    }
    added
}

/// Load `path` and add its rows to `store`.
pub fn seed_from_file(store: &StockStore, path: &Path) -> Result<SeedReport, SeedError> {
    let (products, skipped) = load_products(path)?;
    let loaded = seed_stock(store, products);
    Ok(SeedReport { loaded, skipped })
}
