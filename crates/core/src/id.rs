//! Strongly-typed identifiers used across the stores.
//!
//! Product and order identifiers are assigned by their owning store from a
//! monotonically increasing sequence and rendered as zero-padded 5-digit
//! numbers (`P00001`, `00001`). User identifiers come from outside (the
//! authentication layer) and are carried verbatim.

use core::borrow::Borrow;
use serde::{Deserialize, Serialize};

/// Literal prefix carried by every product identifier.
pub const PRODUCT_ID_PREFIX: &str = "P";

/// Zero-padded width of the numeric part of store-assigned identifiers.
pub const SEQUENCE_WIDTH: usize = 5;

/// Identifier of a product (and of the stock record that owns it).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of an order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Identifier of a user (order owner).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            /// Wrap an existing identifier string (e.g. one received from a caller).
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl Borrow<str> for $t {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_newtype!(ProductId);
impl_string_newtype!(OrderId);
impl_string_newtype!(UserId);

impl ProductId {
    /// Render the identifier for the `seq`-th product added to a store.
    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("{PRODUCT_ID_PREFIX}{seq:0width$}", width = SEQUENCE_WIDTH))
    }
}

impl OrderId {
    /// Render the identifier for the `seq`-th order added to a ledger.
    pub fn from_sequence(seq: u64) -> Self {
        Self(format!("{seq:0width$}", width = SEQUENCE_WIDTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_ids_are_prefixed_and_padded() {
        assert_eq!(ProductId::from_sequence(1).as_str(), "P00001");
        assert_eq!(ProductId::from_sequence(12345).as_str(), "P12345");
    }

    #[test]
    fn order_ids_are_padded_without_prefix() {
        assert_eq!(OrderId::from_sequence(1).as_str(), "00001");
        assert_eq!(OrderId::from_sequence(420).as_str(), "00420");
    }

    #[test]
    fn sequences_past_the_width_are_not_truncated() {
        assert_eq!(ProductId::from_sequence(100_000).as_str(), "P100000");
    }

    #[test]
    fn ids_serialize_as_bare_strings() {
        let json = serde_json::to_string(&ProductId::from_sequence(7)).unwrap();
        assert_eq!(json, "\"P00007\"");
        let back: OrderId = serde_json::from_str("\"00003\"").unwrap();
        assert_eq!(back, OrderId::from_sequence(3));
    }
}
