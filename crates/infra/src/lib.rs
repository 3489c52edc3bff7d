//! Infrastructure layer: order placement, configuration, seed loading, wiring.

pub mod config;
pub mod placement;
pub mod seed;
pub mod services;

mod integration_tests;

pub use config::{AppConfig, ConfigError};
pub use placement::{InventoryStore, OrderPlacement, OrderRequest, PlacementPolicy};
pub use seed::{SeedError, SeedReport};
pub use services::AppServices;
