//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, catcher::Catcher, prelude::*};

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartLineRecord, CartLineUuid, CartRecord, CartStatus, CartUuid},
        },
        customers::{
            MockCustomersService,
            records::{CustomerRecord, CustomerUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderStatus, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
};

use crate::{errors::error_envelope, state::State};

/// Service mocks backing a test [`State`].
///
/// Any mock left without expectations fails the test if a handler calls it.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) customers: MockCustomersService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
}

impl Mocks {
    fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            customers: Arc::new(self.customers),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
        })
    }
}

pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
        .catcher(Catcher::default().hoop(error_envelope))
}

pub(crate) fn make_customer(uuid: CustomerUuid) -> CustomerRecord {
    CustomerRecord {
        uuid,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, price: u64) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Linen Shirt".to_string(),
        image: None,
        price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart_line(cart_uuid: CartUuid, quantity: u32, unit_price: u64) -> CartLineRecord {
    CartLineRecord {
        uuid: CartLineUuid::new(),
        cart_uuid,
        product_uuid: ProductUuid::new(),
        product_name: "Linen Shirt".to_string(),
        product_image: None,
        color: "red".to_string(),
        size: "M".to_string(),
        quantity,
        unit_price,
        total_price: unit_price * u64::from(quantity),
        checked_out: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// An open cart whose total is the sum of `lines`.
pub(crate) fn make_cart(
    uuid: CartUuid,
    customer_uuid: CustomerUuid,
    lines: Vec<CartLineRecord>,
) -> CartRecord {
    CartRecord {
        uuid,
        customer_uuid,
        status: CartStatus::Open,
        total_price: lines.iter().map(|line| line.total_price).sum(),
        lines,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A pending order with one line of `quantity` at `unit_price`.
pub(crate) fn make_order(
    uuid: OrderUuid,
    customer_uuid: CustomerUuid,
    quantity: u32,
    unit_price: u64,
) -> OrderRecord {
    let total_price = unit_price * u64::from(quantity);

    OrderRecord {
        uuid,
        customer_uuid,
        cart_uuid: CartUuid::new(),
        order_date: Timestamp::UNIX_EPOCH,
        payment_method: "cod".to_string(),
        shipping_address: None,
        discount: 0,
        total_price,
        status: OrderStatus::Pending,
        lines: vec![OrderLineRecord {
            uuid: OrderLineUuid::new(),
            order_uuid: uuid,
            line_number: 1,
            product_uuid: ProductUuid::new(),
            product_name: "Linen Shirt".to_string(),
            product_image: None,
            color: "red".to_string(),
            size: "M".to_string(),
            quantity,
            unit_price,
            total_price,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
