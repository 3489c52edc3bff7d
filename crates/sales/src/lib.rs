//! Sales module: orders, their status lifecycle, and the order ledger.
//!
//! The ledger records orders without checking stock; availability is the
//! placement workflow's concern.

pub mod ledger;
pub mod order;

pub use ledger::OrderLedger;
pub use order::{Order, OrderStatus};
