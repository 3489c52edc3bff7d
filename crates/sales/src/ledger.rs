//! Concurrent order ledger with a per-user, newest-first history.
//!
//! The primary table owns every `Order`. A user's history holds order ids
//! only, resolved against the primary table when read, so status changes are
//! visible through it. Both are updated under the same write acquisition.

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use storefront_core::{OrderId, Pagination, StoreError, StoreResult, UserId};

use crate::order::{Order, OrderStatus};

#[derive(Debug)]
struct LedgerTable {
    orders: HashMap<OrderId, Order>,
    /// Newest order first.
    by_user: HashMap<UserId, VecDeque<OrderId>>,
    next_index: u64,
}

/// In-memory order ledger.
#[derive(Debug)]
pub struct OrderLedger {
    inner: RwLock<LedgerTable>,
}

impl Default for OrderLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderLedger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerTable {
                orders: HashMap::new(),
                by_user: HashMap::new(),
                next_index: 1,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LedgerTable> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerTable> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record an order and return it as stored.
    ///
    /// The ledger assigns the id and resets the status to `Placed`. Product
    /// existence and quantity are not checked here.
    pub fn add_order(&self, mut order: Order) -> Order {
        let mut table = self.write();

        order.id = OrderId::from_sequence(table.next_index);
        order.status = OrderStatus::Placed;

        table
            .by_user
            .entry(order.user_id.clone())
            .or_default()
            .push_front(order.id.clone());
        table.orders.insert(order.id.clone(), order.clone());
        table.next_index += 1;

        debug!(
            order_id = %order.id,
            user_id = %order.user_id,
            product_id = %order.product_id,
            "order added"
        );
        order
    }

    pub fn get_order(&self, id: &OrderId) -> StoreResult<Order> {
        self.read()
            .orders
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("order", id.as_str()))
    }

    /// One page of a user's orders, newest first. A user with no orders gets
    /// an empty page.
    pub fn get_orders_by_user(
        &self,
        user_id: &UserId,
        page: Pagination,
    ) -> StoreResult<Vec<Order>> {
        let table = self.read();
        let Some(history) = table.by_user.get(user_id) else {
            return Ok(Vec::new());
        };

        let window = page.window(history.len())?;
        Ok(history
            .range(window)
            .filter_map(|id| table.orders.get(id).cloned())
            .collect())
    }

    /// Overwrite an order's status and return the updated order.
    ///
    /// Fails with `TerminalState` once the order is cancelled; any other
    /// transition is accepted as-is.
    pub fn update_status(&self, id: &OrderId, status: OrderStatus) -> StoreResult<Order> {
        let mut table = self.write();
        let order = table
            .orders
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found("order", id.as_str()))?;

        let previous = order.status;
        order.transition(status)?;

        debug!(order_id = %id, from = %previous, to = %status, "order status updated");
        Ok(order.clone())
    }

    pub fn len(&self) -> usize {
        self.read().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
