//! Store capability traits.
//!
//! These are the seams the application services depend on. Implementations
//! decide the storage engine; the contracts only fix query-by-key reads,
//! staged writes, and a single commit per request.

use thiserror::Error;

use orderdesk_core::OrderId;
use orderdesk_orders::{Discount, Order};
use orderdesk_products::Product;

/// Store operation error (infrastructure, not domain).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Product reference data lookup.
pub trait ProductCatalog: Send + Sync {
    /// Fetch the products whose sku appears in `skus`. Missing skus are
    /// simply absent from the result; callers decide how to surface them.
    fn products_by_skus(&self, skus: &[&str]) -> StoreResult<Vec<Product>>;
}

/// Discount reference data lookup by unique code.
pub trait DiscountCatalog: Send + Sync {
    fn discount_by_code(&self, code: &str) -> StoreResult<Option<Discount>>;
}

/// Order aggregate persistence.
///
/// Writes are staged against the current unit of work and only become
/// visible to `get` after [`UnitOfWork::commit`].
pub trait OrderRepository: Send + Sync {
    /// Load a committed order with all of its line items, expired included.
    fn get(&self, id: OrderId) -> StoreResult<Option<Order>>;

    /// Stage a new order for insertion, assigning its identity. Returns the
    /// order with the id set.
    fn insert(&self, order: Order) -> StoreResult<Order>;

    /// Stage the updated state of an already-persisted order.
    fn save(&self, order: &Order) -> StoreResult<()>;
}

/// Per-request transaction boundary: all reads and the final write of one
/// create/update happen inside it, committed once at the end. Nothing is
/// flushed mid-operation.
pub trait UnitOfWork: Send + Sync {
    fn commit(&self) -> StoreResult<()>;
}
