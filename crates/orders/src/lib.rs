//! Orders domain module.
//!
//! This crate contains the order aggregate and its business rules as
//! deterministic domain logic (no IO, no HTTP, no storage): line-item
//! snapshotting, reconciliation by sku with soft expiry, and the discount
//! engine.

pub mod discount;
pub mod line_item;
pub mod order;
pub mod validator;

pub use discount::{Discount, DiscountKind};
pub use line_item::{LineItem, SetLineItemInput};
pub use order::Order;
pub use validator::{OrderValidator, ValidateOrders};
