use orderdesk_core::ValidationErrors;

use crate::line_item::SetLineItemInput;

/// Order validation capability.
///
/// Injected into the aggregate operations so callers control the policy; the
/// aggregate only cares that an empty error map means "proceed". Every rule
/// runs independently and all failures are collected, never short-circuited.
pub trait ValidateOrders: Send + Sync {
    fn validate(
        &self,
        first_name: &str,
        last_name: &str,
        address: &str,
        line_items: &[SetLineItemInput],
    ) -> ValidationErrors;
}

/// Standard order validator: non-blank customer fields and a non-empty
/// line-item set. Error keys use the JSON field casing.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderValidator;

impl ValidateOrders for OrderValidator {
    fn validate(
        &self,
        first_name: &str,
        last_name: &str,
        address: &str,
        line_items: &[SetLineItemInput],
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if first_name.trim().is_empty() {
            errors.add("firstName", "First name is required");
        }

        if last_name.trim().is_empty() {
            errors.add("lastName", "Last name is required");
        }

        if address.trim().is_empty() {
            errors.add("address", "Address is required");
        }

        if line_items.is_empty() {
            errors.add("lineItems", "Line items are required");
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_core::ProductId;
    use orderdesk_products::Product;
    use rust_decimal::Decimal;

    fn one_item() -> Vec<SetLineItemInput> {
        vec![SetLineItemInput {
            product: Product::new(ProductId::new(), "SKU1", "Product One", Decimal::from(100)),
            quantity: 1,
        }]
    }

    #[test]
    fn valid_request_produces_no_errors() {
        let errors = OrderValidator.validate("Ada", "Lovelace", "12 Crescent", &one_item());
        assert!(errors.is_empty());
    }

    #[test]
    fn blank_customer_fields_are_all_reported() {
        let errors = OrderValidator.validate("", "  ", "\t", &one_item());

        assert_eq!(errors.len(), 3);
        assert!(errors.contains("firstName"));
        assert!(errors.contains("lastName"));
        assert!(errors.contains("address"));
    }

    #[test]
    fn empty_line_items_are_reported_alongside_field_errors() {
        let errors = OrderValidator.validate("", "Lovelace", "12 Crescent", &[]);

        assert_eq!(errors.len(), 2);
        assert!(errors.contains("firstName"));
        assert_eq!(errors.get("lineItems"), Some("Line items are required"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the validator accepts exactly the requests whose
            /// customer fields have non-whitespace content and whose item
            /// list is non-empty.
            #[test]
            fn acceptance_matches_the_rules(
                first in "\\PC{0,12}",
                last in "\\PC{0,12}",
                address in "\\PC{0,24}",
                with_items in any::<bool>(),
            ) {
                let items = if with_items { one_item() } else { Vec::new() };
                let errors = OrderValidator.validate(&first, &last, &address, &items);

                let expected = usize::from(first.trim().is_empty())
                    + usize::from(last.trim().is_empty())
                    + usize::from(address.trim().is_empty())
                    + usize::from(!with_items);

                prop_assert_eq!(errors.len(), expected);
            }
        }
    }
}
