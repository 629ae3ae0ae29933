use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use orderdesk_core::{OrderId, ValidationErrors};

use crate::discount::Discount;
use crate::line_item::{LineItem, SetLineItemInput};
use crate::validator::ValidateOrders;

/// Order aggregate root.
///
/// Owns its line items (composition) and holds the associated discount as
/// cloned reference data. An unsaved order has no identity; the store assigns
/// one on first persist.
///
/// Invariants: customer fields non-blank, line items non-empty at creation,
/// and each sku unique among the non-expired items. Line items are never
/// deleted; an update expires the rows whose sku left the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Option<OrderId>,
    created: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    first_name: String,
    last_name: String,
    address: String,
    discount: Option<Discount>,
    line_items: Vec<LineItem>,
}

impl Order {
    /// Build a new, unsaved order from validated inputs.
    ///
    /// Line items snapshot sku/unit cost from their product and start at the
    /// base total; the discount (if any) is applied afterwards.
    pub fn create(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        discount: Option<Discount>,
        inputs: &[SetLineItemInput],
        validator: &dyn ValidateOrders,
    ) -> Result<Self, ValidationErrors> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let address = address.into();

        check(validator, &first_name, &last_name, &address, inputs)?;

        let now = Utc::now();
        let mut order = Self {
            id: None,
            created: now,
            last_modified: now,
            first_name,
            last_name,
            address,
            discount: None,
            line_items: inputs.iter().map(LineItem::new).collect(),
        };
        order.set_discount(discount);

        Ok(order)
    }

    /// Apply an update request: customer fields, sku reconciliation with soft
    /// expiry, then discount application. State is untouched when validation
    /// fails.
    pub fn update(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        discount: Option<Discount>,
        inputs: &[SetLineItemInput],
        validator: &dyn ValidateOrders,
    ) -> Result<(), ValidationErrors> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let address = address.into();

        check(validator, &first_name, &last_name, &address, inputs)?;

        self.first_name = first_name;
        self.last_name = last_name;
        self.address = address;

        self.reconcile_line_items(inputs);
        self.set_discount(discount);
        self.last_modified = Utc::now();

        Ok(())
    }

    /// Diff the current active items against the requested set by sku: absent
    /// skus expire (rows are retained for audit), matching skus re-quantity
    /// in place, new skus append fresh snapshots. A sku that expired earlier
    /// and reappears gets a fresh row; the expired one stays.
    fn reconcile_line_items(&mut self, inputs: &[SetLineItemInput]) {
        for item in self.line_items.iter_mut().filter(|i| !i.is_expired()) {
            if !inputs.iter().any(|input| input.product.sku() == item.sku()) {
                item.expire();
            }
        }

        for input in inputs {
            let existing = self
                .line_items
                .iter_mut()
                .find(|i| !i.is_expired() && i.sku() == input.product.sku());

            match existing {
                Some(item) => item.set_quantity(input.quantity),
                None => self.line_items.push(LineItem::new(input)),
            }
        }
    }

    /// Replace the discount association and reprice. Base totals are
    /// recomputed first, so applying a discount is idempotent across repeated
    /// updates and never compounds an earlier application.
    fn set_discount(&mut self, discount: Option<Discount>) {
        for item in self.line_items.iter_mut().filter(|i| !i.is_expired()) {
            item.reset_total();
        }

        self.discount = discount;
        if let Some(discount) = &self.discount {
            discount.apply(&mut self.line_items);
        }
    }

    /// Store-assigned identity; set exactly once when the order is first
    /// persisted.
    pub fn assign_id(&mut self, id: OrderId) {
        debug_assert!(self.id.is_none(), "order identity is assigned once");
        self.id = Some(id);
    }

    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    /// Every line item the order has ever carried, expired rows included.
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Non-expired items, in insertion order.
    pub fn active_line_items(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.iter().filter(|i| !i.is_expired())
    }

    /// Order total across active line items.
    pub fn total(&self) -> Decimal {
        self.active_line_items().map(LineItem::total_cost).sum()
    }
}

/// Run the injected validator plus the aggregate-level sku-uniqueness rule,
/// collecting everything into one map.
fn check(
    validator: &dyn ValidateOrders,
    first_name: &str,
    last_name: &str,
    address: &str,
    inputs: &[SetLineItemInput],
) -> Result<(), ValidationErrors> {
    let mut errors = validator.validate(first_name, last_name, address, inputs);

    for (i, input) in inputs.iter().enumerate() {
        let sku = input.product.sku();
        if inputs[..i].iter().any(|other| other.product.sku() == sku) {
            errors.add("lineItems", format!("Duplicate sku: {sku}"));
            break;
        }
    }

    errors.into_result()
}
