use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use orderdesk_core::{Entity, ProductId};
use orderdesk_products::Product;

/// A resolved, validated request to put `quantity` units of a product on an
/// order. Transient value used to feed the aggregate; never persisted.
#[derive(Debug, Clone)]
pub struct SetLineItemInput {
    pub product: Product,
    pub quantity: u32,
}

/// Line item owned by an [`Order`](crate::Order).
///
/// `sku` and `unit_cost` are snapshotted from the product at association
/// time, so later catalog price changes do not reprice existing orders.
/// Removal is modeled as expiry rather than deletion: expired rows stay in
/// the collection for audit history and are immutable apart from
/// `last_modified`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    product_id: ProductId,
    sku: String,
    quantity: u32,
    unit_cost: Decimal,
    total_cost: Decimal,
    expired: bool,
    created: DateTime<Utc>,
    last_modified: DateTime<Utc>,
}

impl LineItem {
    pub(crate) fn new(input: &SetLineItemInput) -> Self {
        let now = Utc::now();
        let unit_cost = input.product.unit_cost();

        Self {
            product_id: *input.product.id(),
            sku: input.product.sku().to_string(),
            quantity: input.quantity,
            unit_cost,
            total_cost: unit_cost * Decimal::from(input.quantity),
            expired: false,
            created: now,
            last_modified: now,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Re-quantity this item from a matched update input. Quantity and total
    /// only move when the requested quantity differs, but a match always
    /// refreshes `last_modified`.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        if self.quantity != quantity {
            self.quantity = quantity;
            self.total_cost = self.unit_cost * Decimal::from(quantity);
        }
        self.touch();
    }

    /// Reset to the undiscounted base total (`unit_cost * quantity`).
    pub(crate) fn reset_total(&mut self) {
        self.total_cost = self.unit_cost * Decimal::from(self.quantity);
    }

    pub(crate) fn set_total(&mut self, total_cost: Decimal) {
        self.total_cost = total_cost;
        self.touch();
    }

    pub(crate) fn expire(&mut self) {
        self.expired = true;
        self.touch();
    }

    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}
