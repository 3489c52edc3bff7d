//! `storefront-core`: shared building blocks for the storefront stores.
//!
//! This crate contains **pure domain** primitives (no locking, no IO).

pub mod entity;
pub mod error;
pub mod id;
pub mod pagination;
pub mod value_object;

pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use id::{OrderId, ProductId, UserId};
pub use pagination::Pagination;
pub use value_object::ValueObject;
