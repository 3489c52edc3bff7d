//! Concurrent product stock table.
//!
//! One `RwLock` guards the whole table: the id → record map, the id
//! sequence and the sorted listing index move together inside a single
//! critical section. Reads take the shared side, mutations the exclusive
//! side, and nothing here calls out to another component while holding it.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_core::{Entity, Pagination, ProductId, StoreError, StoreResult};

use crate::product::{Product, ProductDetails};

/// Mutable inventory entry for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: ProductId,
    pub product: Product,
    /// Cumulative quantity ever stocked.
    pub initial_quantity: i64,
    /// Quantity sellable now. Only the availability check keeps this from
    /// going negative; `adjust_quantity` does not floor it.
    pub current_quantity: i64,
}

impl Entity for StockRecord {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Direction of a stock quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockAction {
    /// New stock arrived: raises both initial and current quantity.
    Increase,
    /// Stock sold: lowers current quantity only.
    Decrease,
}

impl StockAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockAction::Increase => "increase",
            StockAction::Decrease => "decrease",
        }
    }
}

impl FromStr for StockAction {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "increase" => Ok(StockAction::Increase),
            "decrease" => Ok(StockAction::Decrease),
            other => Err(StoreError::invalid_argument(format!(
                "unknown stock action: {other}"
            ))),
        }
    }
}

/// Numeric action codes used by bulk tooling: `0` increase, `1` decrease.
impl TryFrom<i64> for StockAction {
    type Error = StoreError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StockAction::Increase),
            1 => Ok(StockAction::Decrease),
            other => Err(StoreError::invalid_argument(format!(
                "invalid stock action code: {other}"
            ))),
        }
    }
}

#[derive(Debug)]
struct StockTable {
    records: HashMap<ProductId, StockRecord>,
    /// Sequence number the next added product will receive.
    next_index: u64,
    /// All product ids, ascending by string comparison.
    sorted: Vec<ProductId>,
}

/// In-memory stock table shared by every request handler.
///
/// All reads hand back owned snapshots, so a caller holding a record never
/// observes later mutations through it.
#[derive(Debug)]
pub struct StockStore {
    inner: RwLock<StockTable>,
}

impl Default for StockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StockStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StockTable {
                records: HashMap::new(),
                next_index: 1,
                sorted: Vec::new(),
            }),
        }
    }

    // Every critical section leaves the table consistent, so a panic in
    // another holder does not invalidate it.
    fn read(&self) -> RwLockReadGuard<'_, StockTable> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StockTable> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a product with its opening quantity and return the stored record.
    ///
    /// The identifier comes from the store's sequence; `details.id` is ignored.
    pub fn add_product(&self, details: ProductDetails) -> StockRecord {
        let mut table = self.write();

        let id = ProductId::from_sequence(table.next_index);
        let record = StockRecord {
            id: id.clone(),
            product: Product {
                id: id.clone(),
                name: details.name,
                price: details.price,
                category: details.category,
            },
            initial_quantity: details.added_quantity,
            current_quantity: details.added_quantity,
        };

        table.records.insert(id.clone(), record.clone());
        let pos = table.sorted.partition_point(|existing| existing < &id);
        table.sorted.insert(pos, id);
        table.next_index += 1;

        debug!(product_id = %record.id, quantity = record.current_quantity, "product added");
        record
    }

    pub fn get_product(&self, id: &ProductId) -> StoreResult<StockRecord> {
        self.read()
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("product", id.as_str()))
    }

    /// True iff the product exists and has at least `quantity` sellable units.
    pub fn is_available(&self, id: &ProductId, quantity: i64) -> bool {
        self.read()
            .records
            .get(id)
            .is_some_and(|r| r.current_quantity >= quantity)
    }

    /// One page of stock records, ordered by product id.
    pub fn list_products(&self, page: Pagination) -> StoreResult<Vec<StockRecord>> {
        let table = self.read();
        let window = page.window(table.sorted.len())?;

        Ok(table.sorted[window]
            .iter()
            .filter_map(|id| table.records.get(id).cloned())
            .collect())
    }

    /// Apply a quantity delta and return the updated record.
    ///
    /// A decrease is not checked against the current quantity; callers that
    /// must not oversell check `is_available` first or use `try_reserve`.
    /// A result outside the `i64` range fails with `InvalidArgument`.
    pub fn adjust_quantity(
        &self,
        id: &ProductId,
        action: StockAction,
        amount: i64,
    ) -> StoreResult<StockRecord> {
        let mut table = self.write();
        let record = table
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("product", id.as_str()))?;

        let overflow = || {
            StoreError::invalid_argument(format!(
                "{} by {amount} overflows the quantity of {id}",
                action.as_str()
            ))
        };
        match action {
            StockAction::Decrease => {
                record.current_quantity = record
                    .current_quantity
                    .checked_sub(amount)
                    .ok_or_else(overflow)?;
            }
            StockAction::Increase => {
                let initial = record.initial_quantity.checked_add(amount);
                let current = record.current_quantity.checked_add(amount);
                let (Some(initial), Some(current)) = (initial, current) else {
                    return Err(overflow());
                };
                record.initial_quantity = initial;
                record.current_quantity = current;
            }
        }

        debug!(
            product_id = %id,
            action = action.as_str(),
            amount,
            current_quantity = record.current_quantity,
            "stock adjusted"
        );
        Ok(record.clone())
    }

    /// Check-and-decrement under one exclusive acquisition.
    ///
    /// Fails with `Unavailable` (leaving the record untouched) when fewer than
    /// `quantity` units are sellable.
    pub fn try_reserve(&self, id: &ProductId, quantity: i64) -> StoreResult<StockRecord> {
        let mut table = self.write();
        let record = table
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("product", id.as_str()))?;

        if record.current_quantity < quantity {
            return Err(StoreError::unavailable(id.clone(), quantity));
        }
        record.current_quantity = record
            .current_quantity
            .checked_sub(quantity)
            .ok_or_else(|| {
                StoreError::invalid_argument(format!(
                    "reserving {quantity} overflows the quantity of {id}"
                ))
            })?;

        debug!(
            product_id = %id,
            quantity,
            current_quantity = record.current_quantity,
            "stock reserved"
        );
        Ok(record.clone())
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
