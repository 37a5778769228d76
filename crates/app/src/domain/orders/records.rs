//! Order Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;

use crate::{
    domain::{
        carts::records::CartUuid, customers::records::CustomerUuid,
        products::records::ProductUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order fulfilment status.
///
/// ```text
/// pending -> confirmed -> shipped -> delivered
/// pending -> cancelled
/// confirmed -> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether an order in this status may move to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Shipped | Self::Cancelled)
                | (Self::Shipped, Self::Delivered)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_uuid: CustomerUuid,
    pub cart_uuid: CartUuid,
    pub order_date: Timestamp,
    pub payment_method: String,
    pub shipping_address: Option<String>,
    pub discount: u64,
    /// Sum of the line totals, before `discount`.
    pub total_price: u64,
    pub status: OrderStatus,
    pub lines: Vec<OrderLineRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

/// Order Line Record
#[derive(Debug, Clone)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub order_uuid: OrderUuid,
    pub line_number: u32,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_image: Option<String>,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub total_price: u64,
    pub created_at: Timestamp,
}
