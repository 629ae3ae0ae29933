use rust_decimal::Decimal;

use orderdesk_core::{Entity, ProductId};

/// Product reference data.
///
/// `sku` is the unique business key order requests refer to; `unit_cost` is
/// the price a line item snapshots when the product is put on an order.
/// Catalog price changes never reprice existing orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    unit_cost: Decimal,
}

impl Product {
    pub fn new(
        id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        unit_cost: Decimal,
    ) -> Self {
        Self {
            id,
            sku: sku.into(),
            name: name.into(),
            unit_cost,
        }
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}
