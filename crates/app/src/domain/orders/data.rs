//! Order Data

use crate::domain::{
    carts::records::{CartLineRecord, CartUuid},
    customers::records::CustomerUuid,
    orders::records::{OrderLineUuid, OrderUuid},
    products::records::ProductUuid,
};

/// Checkout request: turn the customer's cart into an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub cart_uuid: CartUuid,
    pub customer_uuid: CustomerUuid,
    pub payment_method: String,
    pub shipping_address: Option<String>,
    pub discount: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct NewOrder {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub cart_uuid: CartUuid,
    pub payment_method: String,
    pub shipping_address: Option<String>,
    pub discount: u64,
    pub total_price: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct NewOrderLine {
    pub uuid: OrderLineUuid,
    pub line_number: u32,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: Option<String>,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
}

impl NewOrderLine {
    /// Copy a cart line into the order, numbered from 1.
    pub(crate) fn from_cart_line(line_number: u32, line: &CartLineRecord) -> Self {
        Self {
            uuid: OrderLineUuid::new(),
            line_number,
            product_uuid: line.product_uuid,
            product_name: line.product_name.clone(),
            product_image: line.product_image.clone(),
            color: line.color.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
        }
    }
}
