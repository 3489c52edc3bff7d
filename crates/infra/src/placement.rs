//! Order placement: the only workflow that touches both stores.
//!
//! ```text
//! Compensating                      Reserve
//!   1. stock.is_available             1. stock.try_reserve (check + decrement, one lock)
//!   2. ledger.add_order               2. ledger.add_order
//!   3. stock.decrease
//!      └─ on error: ledger.update_status(Error), return error
//! ```
//!
//! Every step takes its own store's lock; no lock is held across stores.
//!
//! Under `Compensating` the availability check and the decrement are separate
//! acquisitions, so two placements can both pass step 1 against the same last
//! units and both decrement: current quantity goes negative (oversell). The
//! decrement itself is unchecked. `Reserve` closes that window by checking
//! and decrementing under the stock store's exclusive lock before the order
//! exists; since `add_order` cannot fail there is nothing to compensate.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use storefront_core::{ProductId, StoreError, StoreResult, UserId};
use storefront_inventory::{StockAction, StockStore};
use storefront_sales::{Order, OrderLedger, OrderStatus};

/// How placement guards stock between the availability check and the decrement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementPolicy {
    /// Check, record, decrement; mark the order `Error` if the decrement fails.
    /// Can oversell under concurrent placements.
    #[default]
    Compensating,
    /// Atomic check-and-decrement before recording. Never oversells.
    Reserve,
}

impl PlacementPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementPolicy::Compensating => "compensating",
            PlacementPolicy::Reserve => "reserve",
        }
    }
}

impl FromStr for PlacementPolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compensating" => Ok(PlacementPolicy::Compensating),
            "reserve" => Ok(PlacementPolicy::Reserve),
            other => Err(StoreError::invalid_argument(format!(
                "unknown placement policy: {other}"
            ))),
        }
    }
}

/// Stock operations the placement workflow depends on.
pub trait InventoryStore: Send + Sync {
    fn is_available(&self, product_id: &ProductId, quantity: i64) -> bool;
    fn decrease(&self, product_id: &ProductId, quantity: i64) -> StoreResult<()>;
    fn try_reserve(&self, product_id: &ProductId, quantity: i64) -> StoreResult<()>;
}

impl InventoryStore for StockStore {
    fn is_available(&self, product_id: &ProductId, quantity: i64) -> bool {
        StockStore::is_available(self, product_id, quantity)
    }

    fn decrease(&self, product_id: &ProductId, quantity: i64) -> StoreResult<()> {
        self.adjust_quantity(product_id, StockAction::Decrease, quantity)
            .map(|_| ())
    }

    fn try_reserve(&self, product_id: &ProductId, quantity: i64) -> StoreResult<()> {
        StockStore::try_reserve(self, product_id, quantity).map(|_| ())
    }
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn is_available(&self, product_id: &ProductId, quantity: i64) -> bool {
        (**self).is_available(product_id, quantity)
    }

    fn decrease(&self, product_id: &ProductId, quantity: i64) -> StoreResult<()> {
        (**self).decrease(product_id, quantity)
    }

    fn try_reserve(&self, product_id: &ProductId, quantity: i64) -> StoreResult<()> {
        (**self).try_reserve(product_id, quantity)
    }
}

/// A validated buy request from the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub price: f64,
}

impl From<OrderRequest> for Order {
    fn from(req: OrderRequest) -> Self {
        Order::new(req.user_id, req.product_id, req.quantity, req.price)
    }
}

/// Composes the stock store and the order ledger into order placement.
#[derive(Debug)]
pub struct OrderPlacement<S = Arc<StockStore>> {
    stock: S,
    ledger: Arc<OrderLedger>,
    policy: PlacementPolicy,
}

impl<S> OrderPlacement<S>
where
    S: InventoryStore,
{
    pub fn new(stock: S, ledger: Arc<OrderLedger>, policy: PlacementPolicy) -> Self {
        Self {
            stock,
            ledger,
            policy,
        }
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// Place an order and return it as stored in the ledger.
    pub fn place(&self, request: OrderRequest) -> StoreResult<Order> {
        match self.policy {
            PlacementPolicy::Compensating => self.place_compensating(request),
            PlacementPolicy::Reserve => self.place_reserving(request),
        }
    }

    fn place_compensating(&self, request: OrderRequest) -> StoreResult<Order> {
        let product_id = request.product_id.clone();
        let quantity = request.quantity;

        if !self.stock.is_available(&product_id, quantity) {
            warn!(product_id = %product_id, quantity, "order rejected: stock unavailable");
            return Err(StoreError::unavailable(product_id, quantity));
        }

        let order = self.ledger.add_order(request.into());

        if let Err(err) = self.stock.decrease(&product_id, quantity) {
            warn!(
                order_id = %order.id,
                product_id = %product_id,
                error = %err,
                "stock decrement failed; marking order as error"
            );
            if let Err(comp) = self.ledger.update_status(&order.id, OrderStatus::Error) {
                warn!(order_id = %order.id, error = %comp, "compensation failed");
            }
            return Err(err);
        }

        debug!(order_id = %order.id, product_id = %product_id, quantity, "order placed");
        Ok(order)
    }

    fn place_reserving(&self, request: OrderRequest) -> StoreResult<Order> {
        let product_id = request.product_id.clone();
        let quantity = request.quantity;

        if let Err(err) = self.stock.try_reserve(&product_id, quantity) {
            warn!(product_id = %product_id, quantity, error = %err, "order rejected");
            return Err(err);
        }

        let order = self.ledger.add_order(request.into());
        debug!(order_id = %order.id, product_id = %product_id, quantity, "order placed");
        Ok(order)
    }
}
