//! Request/response DTOs and JSON mapping.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::OrderId;
use orderdesk_orders::Order;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub line_items: Vec<LineItemRequest>,
    #[serde(default)]
    pub discount_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub sku: String,
    pub quantity: u32,
}

/// Update requests carry the full order representation. Costs in the body are
/// ignored: pricing always re-derives from the product catalog and the
/// discount code.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub order_id: OrderId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub line_items: Vec<LineItemRequest>,
    #[serde(default)]
    pub discount_code: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub line_items: Vec<LineItemResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub sku: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
}

/// Project a persisted order to its response representation. Expired line
/// items are never returned; the discount code comes from the associated
/// discount entity.
pub fn order_to_response(order_id: OrderId, order: &Order) -> OrderResponse {
    OrderResponse {
        order_id,
        created: order.created(),
        last_modified: order.last_modified(),
        first_name: order.first_name().to_string(),
        last_name: order.last_name().to_string(),
        address: order.address().to_string(),
        discount_code: order.discount().map(|d| d.code().to_string()),
        line_items: order
            .active_line_items()
            .map(|item| LineItemResponse {
                sku: item.sku().to_string(),
                quantity: item.quantity(),
                unit_cost: item.unit_cost(),
                total_cost: item.total_cost(),
            })
            .collect(),
    }
}
