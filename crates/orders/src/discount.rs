use rust_decimal::Decimal;

use orderdesk_core::{DiscountId, Entity};

use crate::line_item::LineItem;

/// Discount behavior, as a closed set.
///
/// New discount types widen this variant and the `apply` dispatch. The set is
/// intentionally closed rather than an open trait hierarchy: the match in
/// `Discount::apply` is the whole dispatch surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountKind {
    /// Percentage off every line item's total; `0.1` means 10% off. Unit
    /// cost is untouched so display/audit keeps the original price.
    General { percentage: Decimal },
    /// Buy one get one free: every second unit of a line is free.
    BuyOneGetOneFree,
}

/// Discount reference data, resolved by its unique `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    id: DiscountId,
    code: String,
    kind: DiscountKind,
}

impl Discount {
    pub fn new(id: DiscountId, code: impl Into<String>, kind: DiscountKind) -> Self {
        Self {
            id,
            code: code.into(),
            kind,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn kind(&self) -> &DiscountKind {
        &self.kind
    }

    /// Apply this discount to the order's line items, in place.
    ///
    /// Items must carry their base totals (`unit_cost * quantity`) when this
    /// runs; the aggregate resets totals first so repeated application never
    /// compounds. Expired items are left untouched.
    pub(crate) fn apply(&self, items: &mut [LineItem]) {
        match &self.kind {
            DiscountKind::General { percentage } => {
                for item in items.iter_mut().filter(|i| !i.is_expired()) {
                    item.set_total(item.total_cost() * (Decimal::ONE - percentage));
                }
            }
            DiscountKind::BuyOneGetOneFree => {
                // Quantity 1 stays at full price: there is no second unit to
                // give away.
                for item in items
                    .iter_mut()
                    .filter(|i| !i.is_expired() && i.quantity() > 1)
                {
                    let unit = item.unit_cost();
                    let quantity = Decimal::from(item.quantity());
                    let total = if item.quantity() % 2 == 0 {
                        unit * quantity / Decimal::TWO
                    } else {
                        unit + unit * (quantity - Decimal::ONE) / Decimal::TWO
                    };
                    item.set_total(total);
                }
            }
        }
    }
}

impl Entity for Discount {
    type Id = DiscountId;

    fn id(&self) -> &DiscountId {
        &self.id
    }
}
