//! Store wiring for transport layers.

use std::sync::Arc;

use storefront_inventory::StockStore;
use storefront_sales::OrderLedger;

use crate::config::AppConfig;
use crate::placement::{OrderPlacement, PlacementPolicy};

/// Process-wide store handles, built once at startup and cloned into every
/// request handler.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub stock: Arc<StockStore>,
    pub ledger: Arc<OrderLedger>,
    pub placement: Arc<OrderPlacement>,
}

impl AppServices {
    /// Fresh, empty stores with the given placement policy.
    pub fn new(policy: PlacementPolicy) -> Self {
        let stock = Arc::new(StockStore::new());
        let ledger = Arc::new(OrderLedger::new());
        let placement = Arc::new(OrderPlacement::new(stock.clone(), ledger.clone(), policy));
        Self {
            stock,
            ledger,
            placement,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{ProductId, UserId};
    use storefront_inventory::ProductDetails;

    use crate::placement::OrderRequest;

    #[test]
    fn placement_shares_the_service_stores() {
        let services = AppServices::new(PlacementPolicy::Reserve);
        services
            .stock
            .add_product(ProductDetails::new("Pen", 1.5, "Stationery", 2));

        let handle = services.clone();
        handle
            .placement
            .place(OrderRequest {
                user_id: UserId::from("U1"),
                product_id: ProductId::from("P00001"),
                quantity: 2,
                price: 1.5,
            })
            .unwrap();

        assert_eq!(services.ledger.len(), 1);
        assert!(!services.stock.is_available(&ProductId::from("P00001"), 1));
    }

    #[test]
    fn config_selects_the_policy() {
        let config = AppConfig {
            placement: PlacementPolicy::Reserve,
            ..AppConfig::default()
        };
        assert_eq!(AppServices::from_config(&config).placement.policy(), PlacementPolicy::Reserve);
    }
}
