//! Application services: orchestration of validation, catalog lookups,
//! aggregate construction/mutation, persistence, and response projection.

use std::sync::Arc;

use thiserror::Error;

use orderdesk_core::{DiscountId, DomainError, OrderId, ProductId, ValidationErrors};
use orderdesk_orders::{
    Discount, DiscountKind, Order, OrderValidator, SetLineItemInput, ValidateOrders,
};
use orderdesk_products::Product;
use orderdesk_store::{
    DiscountCatalog, InMemoryStore, OrderRepository, ProductCatalog, StoreError, StoreResult,
    UnitOfWork,
};
use rust_decimal::Decimal;

use crate::app::dto;

/// What a request can fail with at the application boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Domain(DomainError::Validation(errors))
    }
}

/// Creates orders: validate, resolve products/discount, build the aggregate,
/// persist inside one unit of work, project the response.
pub struct OrderCreator {
    products: Arc<dyn ProductCatalog>,
    discounts: Arc<dyn DiscountCatalog>,
    orders: Arc<dyn OrderRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    validator: Arc<dyn ValidateOrders>,
}

impl OrderCreator {
    pub fn new(
        products: Arc<dyn ProductCatalog>,
        discounts: Arc<dyn DiscountCatalog>,
        orders: Arc<dyn OrderRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        validator: Arc<dyn ValidateOrders>,
    ) -> Self {
        Self {
            products,
            discounts,
            orders,
            unit_of_work,
            validator,
        }
    }

    pub fn create(
        &self,
        request: dto::CreateOrderRequest,
    ) -> Result<dto::OrderResponse, ServiceError> {
        let discount = resolve_discount(self.discounts.as_ref(), request.discount_code.as_deref())?;
        let inputs = resolve_line_items(self.products.as_ref(), &request.line_items)?;

        let order = Order::create(
            request.first_name,
            request.last_name,
            request.address,
            discount,
            &inputs,
            self.validator.as_ref(),
        )?;

        let order = self.orders.insert(order)?;
        self.unit_of_work.commit()?;

        let response = project(&order)?;
        tracing::info!(order_id = %response.order_id, "order created");
        Ok(response)
    }
}

/// Updates orders: load, resolve, reconcile through the aggregate, persist,
/// project. A missing order id is a not-found, never a validation failure.
pub struct OrderUpdater {
    products: Arc<dyn ProductCatalog>,
    discounts: Arc<dyn DiscountCatalog>,
    orders: Arc<dyn OrderRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    validator: Arc<dyn ValidateOrders>,
}

impl OrderUpdater {
    pub fn new(
        products: Arc<dyn ProductCatalog>,
        discounts: Arc<dyn DiscountCatalog>,
        orders: Arc<dyn OrderRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        validator: Arc<dyn ValidateOrders>,
    ) -> Self {
        Self {
            products,
            discounts,
            orders,
            unit_of_work,
            validator,
        }
    }

    pub fn update(
        &self,
        request: dto::UpdateOrderRequest,
    ) -> Result<dto::OrderResponse, ServiceError> {
        let mut order = self
            .orders
            .get(request.order_id)?
            .ok_or(DomainError::NotFound)?;

        let discount = resolve_discount(self.discounts.as_ref(), request.discount_code.as_deref())?;
        let inputs = resolve_line_items(self.products.as_ref(), &request.line_items)?;

        order.update(
            request.first_name,
            request.last_name,
            request.address,
            discount,
            &inputs,
            self.validator.as_ref(),
        )?;

        self.orders.save(&order)?;
        self.unit_of_work.commit()?;

        let response = project(&order)?;
        tracing::info!(order_id = %response.order_id, "order updated");
        Ok(response)
    }
}

/// Reads committed orders and projects them.
pub struct OrderReader {
    orders: Arc<dyn OrderRepository>,
}

impl OrderReader {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub fn read(&self, id: OrderId) -> Result<dto::OrderResponse, ServiceError> {
        let order = self.orders.get(id)?.ok_or(DomainError::NotFound)?;
        project(&order)
    }
}

pub struct AppServices {
    pub creator: OrderCreator,
    pub updater: OrderUpdater,
    pub reader: OrderReader,
}

/// Wire the services over a freshly seeded in-memory store.
///
/// Product/discount administration has no surface of its own, so the server
/// starts with a small demo catalog.
pub fn build_services() -> StoreResult<AppServices> {
    let store = Arc::new(InMemoryStore::new());
    seed_demo_catalog(&store)?;
    Ok(services_over(store))
}

pub(crate) fn services_over(store: Arc<InMemoryStore>) -> AppServices {
    let validator: Arc<dyn ValidateOrders> = Arc::new(OrderValidator);

    AppServices {
        creator: OrderCreator::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            validator.clone(),
        ),
        updater: OrderUpdater::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            validator,
        ),
        reader: OrderReader::new(store),
    }
}

pub(crate) fn seed_demo_catalog(store: &InMemoryStore) -> StoreResult<()> {
    store.seed_products([
        Product::new(ProductId::new(), "SKU1", "Product One", Decimal::from(100)),
        Product::new(ProductId::new(), "SKU2", "Product Two", Decimal::from(200)),
        Product::new(ProductId::new(), "SKU3", "Product Three", Decimal::from(150)),
    ])?;
    store.seed_discounts([
        Discount::new(
            DiscountId::new(),
            "10PERCENT",
            DiscountKind::General {
                percentage: Decimal::new(1, 1),
            },
        ),
        Discount::new(DiscountId::new(), "BOGOF", DiscountKind::BuyOneGetOneFree),
    ])
}

/// Absent or blank code means no discount; an unknown code is a rejected
/// request, not a silent no-op.
fn resolve_discount(
    catalog: &dyn DiscountCatalog,
    code: Option<&str>,
) -> Result<Option<Discount>, ServiceError> {
    let Some(code) = code.filter(|c| !c.trim().is_empty()) else {
        return Ok(None);
    };

    match catalog.discount_by_code(code)? {
        Some(discount) => Ok(Some(discount)),
        None => {
            let mut errors = ValidationErrors::new();
            errors.add("discountCode", "Discount code not found");
            Err(errors.into())
        }
    }
}

/// Resolve requested skus against the catalog. A sku with no product behind
/// it surfaces as a field-keyed validation failure rather than an unmatched
/// join downstream.
fn resolve_line_items(
    catalog: &dyn ProductCatalog,
    requested: &[dto::LineItemRequest],
) -> Result<Vec<SetLineItemInput>, ServiceError> {
    let skus: Vec<&str> = requested.iter().map(|item| item.sku.as_str()).collect();
    let products = catalog.products_by_skus(&skus)?;

    let mut inputs = Vec::with_capacity(requested.len());
    for item in requested {
        let Some(product) = products.iter().find(|p| p.sku() == item.sku) else {
            let mut errors = ValidationErrors::new();
            errors.add("lineItems", format!("Unknown sku: {}", item.sku));
            return Err(errors.into());
        };

        inputs.push(SetLineItemInput {
            product: product.clone(),
            quantity: item.quantity,
        });
    }

    Ok(inputs)
}

fn project(order: &Order) -> Result<dto::OrderResponse, ServiceError> {
    let order_id = order
        .id()
        .ok_or_else(|| StoreError::backend("persisted order has no id"))?;
    Ok(dto::order_to_response(order_id, order))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Dependencies are resolved against a real in-memory store rather than
    // mocks; the services and the store are exercised together.
    fn services() -> AppServices {
        let store = Arc::new(InMemoryStore::new());
        seed_demo_catalog(&store).unwrap();
        services_over(store)
    }

    fn item(sku: &str, quantity: u32) -> dto::LineItemRequest {
        dto::LineItemRequest {
            sku: sku.to_string(),
            quantity,
        }
    }

    fn create_request() -> dto::CreateOrderRequest {
        dto::CreateOrderRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 Crescent".to_string(),
            line_items: vec![item("SKU1", 1), item("SKU2", 2)],
            discount_code: None,
        }
    }

    fn update_request(order_id: OrderId, skus: Vec<dto::LineItemRequest>) -> dto::UpdateOrderRequest {
        dto::UpdateOrderRequest {
            order_id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address: "12 Crescent".to_string(),
            line_items: skus,
            discount_code: None,
        }
    }

    fn validation_errors(err: ServiceError) -> ValidationErrors {
        match err {
            ServiceError::Domain(DomainError::Validation(errors)) => errors,
            other => panic!("expected a validation failure, got {other:?}"),
        }
    }

    #[test]
    fn create_prices_lines_from_the_catalog() {
        let services = services();

        let response = services.creator.create(create_request()).unwrap();

        assert_eq!(response.first_name, "Ada");
        assert_eq!(response.line_items.len(), 2);
        assert_eq!(response.line_items[0].unit_cost, Decimal::from(100));
        assert_eq!(response.line_items[0].total_cost, Decimal::from(100));
        assert_eq!(response.line_items[1].total_cost, Decimal::from(400));
    }

    #[test]
    fn create_with_blank_fields_reports_every_failure() {
        let services = services();

        let request = dto::CreateOrderRequest {
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            line_items: Vec::new(),
            discount_code: None,
        };
        let errors = validation_errors(services.creator.create(request).unwrap_err());

        assert_eq!(errors.len(), 4);
        assert!(errors.contains("firstName"));
        assert!(errors.contains("lastName"));
        assert!(errors.contains("address"));
        assert!(errors.contains("lineItems"));
    }

    #[test]
    fn create_with_unknown_sku_is_a_validation_failure() {
        let services = services();

        let mut request = create_request();
        request.line_items.push(item("SKU9", 1));
        let errors = validation_errors(services.creator.create(request).unwrap_err());

        assert_eq!(errors.get("lineItems"), Some("Unknown sku: SKU9"));
    }

    #[test]
    fn create_with_unknown_discount_code_is_a_validation_failure() {
        let services = services();

        let mut request = create_request();
        request.discount_code = Some("NOPE".to_string());
        let errors = validation_errors(services.creator.create(request).unwrap_err());

        assert_eq!(errors.get("discountCode"), Some("Discount code not found"));
    }

    #[test]
    fn created_orders_are_committed_and_readable() {
        let services = services();

        let created = services.creator.create(create_request()).unwrap();
        let read = services.reader.read(created.order_id).unwrap();

        assert_eq!(read.first_name, created.first_name);
        assert_eq!(read.discount_code, created.discount_code);
        assert_eq!(read.line_items.len(), created.line_items.len());
    }

    #[test]
    fn read_of_unknown_order_is_not_found() {
        let services = services();

        let err = services.reader.read(OrderId::new()).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound)));
    }

    #[test]
    fn update_of_unknown_order_is_not_found_even_with_invalid_fields() {
        let services = services();

        let mut request = update_request(OrderId::new(), Vec::new());
        request.first_name = String::new();

        let err = services.updater.update(request).unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound)));
    }

    #[test]
    fn update_expires_removed_skus_and_excludes_them_from_the_response() {
        let services = services();

        let created = services
            .creator
            .create(dto::CreateOrderRequest {
                line_items: vec![item("SKU3", 1), item("SKU2", 2)],
                ..create_request()
            })
            .unwrap();

        let updated = services
            .updater
            .update(update_request(
                created.order_id,
                vec![item("SKU1", 1), item("SKU2", 2)],
            ))
            .unwrap();

        let mut skus: Vec<_> = updated.line_items.iter().map(|l| l.sku.as_str()).collect();
        skus.sort_unstable();
        assert_eq!(skus, ["SKU1", "SKU2"]);

        let read = services.reader.read(created.order_id).unwrap();
        let mut read_skus: Vec<_> = read.line_items.iter().map(|l| l.sku.as_str()).collect();
        read_skus.sort_unstable();
        assert_eq!(read_skus, ["SKU1", "SKU2"]);
    }

    #[test]
    fn repeated_discounted_updates_do_not_compound() {
        let services = services();

        let created = services
            .creator
            .create(dto::CreateOrderRequest {
                discount_code: Some("10PERCENT".to_string()),
                ..create_request()
            })
            .unwrap();
        assert_eq!(created.line_items[1].total_cost, Decimal::from(360));

        let mut request = update_request(
            created.order_id,
            vec![item("SKU1", 1), item("SKU2", 2)],
        );
        request.discount_code = Some("10PERCENT".to_string());
        services.updater.update(request).unwrap();

        let mut request = update_request(
            created.order_id,
            vec![item("SKU1", 1), item("SKU2", 2)],
        );
        request.discount_code = Some("10PERCENT".to_string());
        let updated = services.updater.update(request).unwrap();

        assert_eq!(updated.line_items[0].total_cost, Decimal::from(90));
        assert_eq!(updated.line_items[1].total_cost, Decimal::from(360));
    }

    #[test]
    fn update_with_empty_line_items_is_rejected_not_a_mass_expiry() {
        let services = services();

        let created = services.creator.create(create_request()).unwrap();
        let errors = validation_errors(
            services
                .updater
                .update(update_request(created.order_id, Vec::new()))
                .unwrap_err(),
        );
        assert!(errors.contains("lineItems"));

        let read = services.reader.read(created.order_id).unwrap();
        assert_eq!(read.line_items.len(), 2);
    }

    #[test]
    fn rejected_update_leaves_the_committed_order_untouched() {
        let services = services();

        let created = services.creator.create(create_request()).unwrap();

        let mut request = update_request(created.order_id, vec![item("SKU1", 5)]);
        request.address = String::new();
        services.updater.update(request).unwrap_err();

        let read = services.reader.read(created.order_id).unwrap();
        assert_eq!(read.address, "12 Crescent");
        assert_eq!(read.line_items.len(), 2);
        assert_eq!(read.line_items[0].quantity, 1);
    }
}
