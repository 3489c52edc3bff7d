//! Integration tests across both stores.
//!
//! Tests: seed → StockStore → OrderPlacement → OrderLedger
//!
//! Verifies:
//! - Placement keeps stock and ledger consistent under concurrent requests
//! - `Reserve` never oversells; `Compensating` accounts every order it records
//! - Status updates flow through to user histories

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use storefront_core::{OrderId, Pagination, ProductId, StoreError, UserId};
    use storefront_inventory::{ProductDetails, StockAction};
    use storefront_sales::OrderStatus;

    use crate::placement::{OrderRequest, PlacementPolicy};
    use crate::seed::seed_from_file;
    use crate::services::AppServices;

    fn request(user: &str, product: &str, qty: i64) -> OrderRequest {
        OrderRequest {
            user_id: UserId::from(user),
            product_id: ProductId::from(product),
            quantity: qty,
            price: 1.5,
        }
    }

    #[test]
    fn seeded_store_serves_orders_end_to_end() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "Pen", "price": 1.5, "category": "Stationery", "added_quantity": 10}},
                {{"name": "Mug", "price": 7.0, "category": "Kitchen", "added_quantity": 2}}
            ]"#
        )
        .unwrap();

        let services = AppServices::new(PlacementPolicy::Compensating);
        let report = seed_from_file(&services.stock, file.path()).unwrap();
        assert_eq!(report.loaded, 2);

        let first = services.placement.place(request("U1", "P00001", 3)).unwrap();
        let second = services.placement.place(request("U1", "P00002", 2)).unwrap();
        let rejected = services.placement.place(request("U1", "P00002", 1)).unwrap_err();
        assert!(matches!(rejected, StoreError::Unavailable { .. }));

        let history = services
            .ledger
            .get_orders_by_user(&UserId::from("U1"), Pagination::new(1, 10))
            .unwrap();
        assert_eq!(history, vec![second, first]);
    }

    #[test]
    fn restock_makes_product_orderable_again() {
        let services = AppServices::new(PlacementPolicy::Reserve);
        services
            .stock
            .add_product(ProductDetails::new("Pen", 1.5, "Stationery", 1));
        services.placement.place(request("U1", "P00001", 1)).unwrap();
        assert!(services.placement.place(request("U2", "P00001", 1)).is_err());

        let rec = services
            .stock
            .adjust_quantity(&ProductId::from("P00001"), StockAction::Increase, 5)
            .unwrap();
        assert_eq!(rec.initial_quantity, 6);
        assert_eq!(rec.current_quantity, 5);
        services.placement.place(request("U2", "P00001", 1)).unwrap();
    }

    #[test]
    fn cancelled_orders_stay_cancelled_in_history() {
        let services = AppServices::new(PlacementPolicy::Compensating);
        services
            .stock
            .add_product(ProductDetails::new("Pen", 1.5, "Stationery", 5));
        let order = services.placement.place(request("U1", "P00001", 1)).unwrap();

        services
            .ledger
            .update_status(&order.id, OrderStatus::Cancelled)
            .unwrap();
        let err = services
            .ledger
            .update_status(&order.id, OrderStatus::Cancelled)
            .unwrap_err();
        assert_eq!(err, StoreError::terminal_state(order.id.as_str()));

        let history = services
            .ledger
            .get_orders_by_user(&UserId::from("U1"), Pagination::default())
            .unwrap();
        assert_eq!(history[0].status, OrderStatus::Cancelled);
    }

    #[test]
    fn reserve_never_oversells_under_contention() {
        const STOCK: i64 = 50;
        const BUYERS: usize = 16;
        const ATTEMPTS: usize = 10;

        let services = AppServices::new(PlacementPolicy::Reserve);
        services
            .stock
            .add_product(ProductDetails::new("Pen", 1.5, "Stationery", STOCK));
        let placed = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for b in 0..BUYERS {
                let services = &services;
                let placed = &placed;
                s.spawn(move || {
                    for _ in 0..ATTEMPTS {
                        let req = request(&format!("U{b}"), "P00001", 1);
                        if services.placement.place(req).is_ok() {
                            placed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        let rec = services.stock.get_product(&ProductId::from("P00001")).unwrap();
        assert_eq!(placed.load(Ordering::Relaxed), STOCK as usize);
        assert_eq!(rec.current_quantity, 0);
        assert_eq!(services.ledger.len(), STOCK as usize);
    }

    #[test]
    fn compensating_accounts_for_every_recorded_order() {
        const STOCK: i64 = 50;
        const BUYERS: usize = 16;
        const ATTEMPTS: usize = 10;

        let services = AppServices::new(PlacementPolicy::Compensating);
        services
            .stock
            .add_product(ProductDetails::new("Pen", 1.5, "Stationery", STOCK));

        std::thread::scope(|s| {
            for b in 0..BUYERS {
                let services = &services;
                s.spawn(move || {
                    for _ in 0..ATTEMPTS {
                        let _ = services.placement.place(request(&format!("U{b}"), "P00001", 1));
                    }
                });
            }
        });

        // The check/decrement window can oversell, but every recorded order
        // was decremented exactly once.
        let rec = services.stock.get_product(&ProductId::from("P00001")).unwrap();
        let recorded = services.ledger.len() as i64;
        assert!(recorded >= STOCK);
        assert_eq!(rec.current_quantity, STOCK - recorded);

        for seq in 1..=recorded as u64 {
            let order = services.ledger.get_order(&OrderId::from_sequence(seq)).unwrap();
            assert_eq!(order.status, OrderStatus::Placed);
        }
    }

    #[test]
    fn concurrent_readers_see_consistent_pages() {
        let services = AppServices::new(PlacementPolicy::Reserve);
        for i in 0..20 {
            services
                .stock
                .add_product(ProductDetails::new(format!("item-{i}"), 1.0, "Misc", 100));
        }

        std::thread::scope(|s| {
            for _ in 0..4 {
                let services = &services;
                s.spawn(move || {
                    for i in 0..50 {
                        let product = ProductId::from_sequence(1 + (i % 20) as u64);
                        services
                            .placement
                            .place(OrderRequest {
                                user_id: UserId::from("U1"),
                                product_id: product,
                                quantity: 1,
                                price: 1.0,
                            })
                            .unwrap();
                    }
                });
            }
            for _ in 0..4 {
                let services = &services;
                s.spawn(move || {
                    for _ in 0..50 {
                        let page = services.stock.list_products(Pagination::new(2, 5)).unwrap();
                        let ids: Vec<_> = page.iter().map(|r| r.id.clone()).collect();
                        let expected: Vec<_> = (6..=10).map(ProductId::from_sequence).collect();
                        assert_eq!(ids, expected);
                    }
                });
            }
        });

        let history = services
            .ledger
            .get_orders_by_user(&UserId::from("U1"), Pagination::new(1, 500))
            .unwrap();
        assert_eq!(history.len(), 200);
    }
}
