//! Cart Data

use crate::domain::{
    carts::records::{CartLineUuid, CartUuid},
    customers::records::CustomerUuid,
    products::records::ProductUuid,
};

/// Add-to-cart request.
#[derive(Debug, Clone, PartialEq)]
pub struct AddToCart {
    pub customer_uuid: CustomerUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub color: String,
    pub size: String,
}

/// A line as inserted on first add, priced from the catalog.
#[derive(Debug, Clone)]
pub(crate) struct NewCartLine {
    pub uuid: CartLineUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: Option<String>,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
}
