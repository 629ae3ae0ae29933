//! In-memory store with transactional save semantics.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use orderdesk_core::OrderId;
use orderdesk_orders::{Discount, Order};
use orderdesk_products::Product;

use crate::repository::{
    DiscountCatalog, OrderRepository, ProductCatalog, StoreError, StoreResult, UnitOfWork,
};

/// In-memory store.
///
/// Reference data (products, discounts) is seeded up front and read-only.
/// Order writes are staged and only published to readers on commit,
/// mirroring the unit-of-work semantics of a relational store: a request
/// that fails before commit leaves nothing behind.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: Mutex<Vec<Product>>,
    discounts: Mutex<Vec<Discount>>,
    orders: Mutex<HashMap<OrderId, Order>>,
    staged: Mutex<Vec<Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_products(&self, products: impl IntoIterator<Item = Product>) -> StoreResult<()> {
        lock(&self.products)?.extend(products);
        Ok(())
    }

    pub fn seed_discounts(&self, discounts: impl IntoIterator<Item = Discount>) -> StoreResult<()> {
        lock(&self.discounts)?.extend(discounts);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> StoreResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StoreError::backend("store lock poisoned"))
}

impl ProductCatalog for InMemoryStore {
    fn products_by_skus(&self, skus: &[&str]) -> StoreResult<Vec<Product>> {
        let products = lock(&self.products)?;
        Ok(products
            .iter()
            .filter(|p| skus.contains(&p.sku()))
            .cloned()
            .collect())
    }
}

impl DiscountCatalog for InMemoryStore {
    fn discount_by_code(&self, code: &str) -> StoreResult<Option<Discount>> {
        let discounts = lock(&self.discounts)?;
        Ok(discounts.iter().find(|d| d.code() == code).cloned())
    }
}

impl OrderRepository for InMemoryStore {
    fn get(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let orders = lock(&self.orders)?;
        Ok(orders.get(&id).cloned())
    }

    fn insert(&self, mut order: Order) -> StoreResult<Order> {
        order.assign_id(OrderId::new());
        lock(&self.staged)?.push(order.clone());
        Ok(order)
    }

    fn save(&self, order: &Order) -> StoreResult<()> {
        if order.id().is_none() {
            return Err(StoreError::backend("cannot save an order without an id"));
        }
        lock(&self.staged)?.push(order.clone());
        Ok(())
    }
}

impl UnitOfWork for InMemoryStore {
    fn commit(&self) -> StoreResult<()> {
        let mut staged = lock(&self.staged)?;
        let mut orders = lock(&self.orders)?;

        let count = staged.len();
        for order in staged.drain(..) {
            let id = order
                .id()
                .ok_or_else(|| StoreError::backend("staged order without an id"))?;
            orders.insert(id, order);
        }

        tracing::debug!(writes = count, "unit of work committed");
        Ok(())
    }
}
