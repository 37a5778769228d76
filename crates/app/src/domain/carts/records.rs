//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{customers::records::CustomerUuid, products::records::ProductUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart lifecycle. A cart is `Open` until it is checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "cart_status", rename_all = "snake_case")]
pub enum CartStatus {
    Open,
    Closed,
}

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub customer_uuid: CustomerUuid,
    pub status: CartStatus,
    pub total_price: u64,
    pub lines: Vec<CartLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLineRecord>;

/// Cart Line Record
///
/// `product_name`, `product_image` and `unit_price` are copied from the
/// catalog when the line is created and never refreshed.
#[derive(Debug, Clone)]
pub struct CartLineRecord {
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
    pub checked_out: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
