//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{OrderLineRecord, OrderRecord, OrderStatus};

use crate::{errors::ApiError, extensions::*, orders::into_api_error, state::State};

/// Order fulfilment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OrderStatusValue {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl From<OrderStatus> for OrderStatusValue {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Pending,
            OrderStatus::Confirmed => Self::Confirmed,
            OrderStatus::Shipped => Self::Shipped,
            OrderStatus::Delivered => Self::Delivered,
            OrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<OrderStatusValue> for OrderStatus {
    fn from(status: OrderStatusValue) -> Self {
        match status {
            OrderStatusValue::Pending => Self::Pending,
            OrderStatusValue::Confirmed => Self::Confirmed,
            OrderStatusValue::Shipped => Self::Shipped,
            OrderStatusValue::Delivered => Self::Delivered,
            OrderStatusValue::Cancelled => Self::Cancelled,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub id: Uuid,

    pub customer_id: Uuid,

    /// The cart this order was checked out from
    pub cart_id: Uuid,

    /// The date and time the order was placed
    pub order_date: String,

    pub payment_method: String,

    pub shipping_address: Option<String>,

    /// Discount in minor units, applied on top of `total_price`
    pub discount: u64,

    /// Sum of the line totals in minor units
    pub total_price: u64,

    pub status: OrderStatusValue,

    pub lines: Vec<OrderLineResponse>,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            id: order.uuid.into(),
            customer_id: order.customer_uuid.into(),
            cart_id: order.cart_uuid.into(),
            order_date: order.order_date.to_string(),
            payment_method: order.payment_method,
            shipping_address: order.shipping_address,
            discount: order.discount,
            total_price: order.total_price,
            status: order.status.into(),
            lines: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub id: Uuid,

    /// Position within the order, starting at 1
    pub line_number: u32,

    pub product_id: Uuid,

    pub product_name: String,

    pub product_image: Option<String>,

    pub color: String,

    pub size: String,

    pub quantity: u32,

    pub unit_price: u64,

    pub total_price: u64,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            id: line.uuid.into(),
            line_number: line.line_number,
            product_id: line.product_uuid.into(),
            product_name: line.product_name,
            product_image: line.product_image,
            color: line.color,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
        }
    }
}

/// Order Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub message: String,
    pub data: OrderResponse,
}

/// Order List Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersEnvelope {
    pub message: String,
    pub data: Vec<OrderResponse>,
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(OrderEnvelope {
        message: "Order retrieved successfully".to_string(),
        data: order.into(),
    }))
}
