use serde::{Deserialize, Serialize};

use storefront_core::{ProductId, ValueObject};

/// Immutable catalog facts for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in currency units.
    pub price: f64,
    pub category: String,
}

impl ValueObject for Product {}

/// Input for adding a product to the stock table.
///
/// `id` is accepted so bulk loaders can pass rows through unchanged, but the
/// store always assigns its own identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(alias = "addedQuantity")]
    pub added_quantity: i64,
}

impl ProductDetails {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        added_quantity: i64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            category: category.into(),
            added_quantity,
        }
    }
}
