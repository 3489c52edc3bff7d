use std::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{Entity, OrderId, ProductId, StoreError, StoreResult, UserId};

/// Order status lifecycle.
///
/// Only `Cancelled` is terminal; every other status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Shipped,
    Cancelled,
    Delivered,
    Error,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Placed,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
        OrderStatus::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StoreError::invalid_argument(format!("unknown order status: {s}")))
    }
}

/// A buy order for one product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Assigned by the ledger; whatever the caller puts here is replaced.
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i64,
    /// Unit price at the time of ordering.
    pub price: f64,
    /// Forced to `Placed` on insert.
    pub status: OrderStatus,
}

impl Order {
    /// Build an order request; `id` and `status` are placeholders until the
    /// ledger stores it.
    pub fn new(user_id: UserId, product_id: ProductId, quantity: i64, price: f64) -> Self {
        Self {
            id: OrderId::new(String::new()),
            user_id,
            product_id,
            quantity,
            price,
            status: OrderStatus::Placed,
        }
    }

    /// Move to `status` unless the order is already cancelled.
    pub(crate) fn transition(&mut self, status: OrderStatus) -> StoreResult<()> {
        if self.status.is_terminal() {
            return Err(StoreError::terminal_state(self.id.as_str()));
        }
        self.status = status;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_its_name() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_invalid_argument() {
        assert!(matches!(
            "returned".parse::<OrderStatus>(),
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Delivered).unwrap();
        assert_eq!(json, "\"delivered\"");
    }

    #[test]
    fn cancelled_blocks_transitions() {
        let mut order = Order::new(UserId::from("U1"), ProductId::from("P00001"), 1, 2.0);
        order.transition(OrderStatus::Cancelled).unwrap();
        assert!(order.transition(OrderStatus::Placed).is_err());
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn backwards_transitions_are_allowed() {
        let mut order = Order::new(UserId::from("U1"), ProductId::from("P00001"), 1, 2.0);
        order.transition(OrderStatus::Delivered).unwrap();
        order.transition(OrderStatus::Placed).unwrap();
        assert_eq!(order.status, OrderStatus::Placed);
    }
}
