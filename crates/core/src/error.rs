//! Store error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the store layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
///
/// Every variant is a local, recoverable condition returned to the immediate
/// caller. The stores never retry; retry policy belongs to whoever drives them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An unknown product or order identifier was referenced.
    #[error("{entity} not found, id: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The page window starts before the first record (page < 1).
    #[error("invalid page number: {page}")]
    InvalidPage { page: i64 },

    /// An argument outside the accepted set (e.g. unknown stock action).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A status change was attempted on an order in a terminal state.
    #[error("order {id} is already cancelled")]
    TerminalState { id: String },

    /// Not enough sellable stock to satisfy a request.
    #[error("product {product_id} is not available in quantity {requested}")]
    Unavailable { product_id: ProductId, requested: i64 },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_page(page: i64) -> Self {
        Self::InvalidPage { page }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn terminal_state(id: impl Into<String>) -> Self {
        Self::TerminalState { id: id.into() }
    }

    pub fn unavailable(product_id: ProductId, requested: i64) -> Self {
        Self::Unavailable {
            product_id,
            requested,
        }
    }

    /// True for the lookup failure variant, regardless of entity kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
