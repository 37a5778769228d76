//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::CartLineRecord,
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        orders::{
            data::{Checkout, NewOrder, NewOrderLine},
            errors::OrdersServiceError,
            records::{OrderLineRecord, OrderRecord, OrderStatus, OrderUuid},
            repositories::{PgOrderLinesRepository, PgOrdersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    order_lines: PgOrderLinesRepository,
    carts: PgCartsRepository,
    cart_lines: PgCartLinesRepository,
    customers: PgCustomersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            order_lines: PgOrderLinesRepository::new(),
            carts: PgCartsRepository::new(),
            cart_lines: PgCartLinesRepository::new(),
            customers: PgCustomersRepository::new(),
        }
    }

    /// Write phase of checkout. Every statement, and the commit, either
    /// succeeds or the whole transaction is rolled back on drop.
    async fn place_order(
        &self,
        mut tx: Transaction<'static, Postgres>,
        order: NewOrder,
        cart_lines: &[CartLineRecord],
    ) -> Result<OrderRecord, sqlx::Error> {
        let cart_uuid = order.cart_uuid;

        let mut created = self.orders.create_order(&mut tx, order).await?;

        let lines = cart_lines
            .iter()
            .zip(1..)
            .map(|(line, line_number)| NewOrderLine::from_cart_line(line_number, line))
            .collect();

        created.lines = self
            .order_lines
            .create_lines(&mut tx, created.uuid, lines)
            .await?;

        let line_uuids: Vec<_> = cart_lines.iter().map(|line| line.uuid).collect();

        let checked_out = self.cart_lines.check_out_lines(&mut tx, &line_uuids).await?;

        if u64::try_from(line_uuids.len()).ok() != Some(checked_out) {
            return Err(sqlx::Error::RowNotFound);
        }

        if self.carts.close_cart(&mut tx, cart_uuid).await? == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn attach_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), OrdersServiceError> {
        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut grouped: FxHashMap<OrderUuid, Vec<OrderLineRecord>> = FxHashMap::default();

        for line in self.order_lines.get_lines(tx, &uuids).await? {
            grouped.entry(line.order_uuid).or_default().push(line);
        }

        for order in orders {
            order.lines = grouped.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.checkout",
        skip(self, checkout),
        fields(
            customer_uuid = %checkout.customer_uuid,
            cart_uuid = %checkout.cart_uuid,
            order_uuid = tracing::field::Empty,
            line_count = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(&self, checkout: Checkout) -> Result<OrderRecord, OrdersServiceError> {
        if checkout.payment_method.trim().is_empty() {
            return Err(OrdersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        self.customers
            .find_customer(&mut tx, checkout.customer_uuid)
            .await?
            .ok_or(OrdersServiceError::CustomerNotFound)?;

        let cart = self
            .carts
            .lock_cart(&mut tx, checkout.cart_uuid)
            .await?
            .filter(|cart| cart.customer_uuid == checkout.customer_uuid)
            .ok_or(OrdersServiceError::CartNotFound)?;

        let lines = self.cart_lines.lock_open_lines(&mut tx, cart.uuid).await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let total_price = lines
            .iter()
            .try_fold(0_u64, |total, line| total.checked_add(line.total_price))
            .ok_or(OrdersServiceError::InvalidData)?;

        if checkout.discount > total_price {
            return Err(OrdersServiceError::InvalidDiscount);
        }

        let order_uuid = OrderUuid::new();

        let span = Span::current();

        span.record("order_uuid", tracing::field::display(order_uuid));
        span.record("line_count", lines.len());

        let order = self
            .place_order(
                tx,
                NewOrder {
                    uuid: order_uuid,
                    customer_uuid: checkout.customer_uuid,
                    cart_uuid: cart.uuid,
                    payment_method: checkout.payment_method,
                    shipping_address: checkout.shipping_address,
                    discount: checkout.discount,
                    total_price,
                },
                &lines,
            )
            .await
            .map_err(OrdersServiceError::OrderCreationFailed)?;

        info!(
            order_uuid = %order.uuid,
            cart_uuid = %order.cart_uuid,
            total_price = order.total_price,
            "placed order"
        );

        Ok(order)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .orders
            .find_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let mut orders = [order];

        self.attach_lines(&mut tx, &mut orders).await?;

        tx.commit().await?;

        let [order] = orders;

        Ok(order)
    }

    async fn list_customer_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.customers
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(OrdersServiceError::CustomerNotFound)?;

        let mut orders = self.orders.list_customer_orders(&mut tx, customer).await?;

        self.attach_lines(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip(self),
        fields(order_uuid = %order, from = tracing::field::Empty, to = %status),
        err
    )]
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders
            .lock_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        Span::current().record("from", tracing::field::display(current.status));

        if !current.status.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self.orders.update_status(&mut tx, order, status).await?;

        let mut orders = [updated];

        self.attach_lines(&mut tx, &mut orders).await?;

        tx.commit().await?;

        let [updated] = orders;

        info!(
            order_uuid = %updated.uuid,
            from = %current.status,
            to = %updated.status,
            "updated order status"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the customer's cart into a pending order.
    ///
    /// All lines not yet checked out are copied into the order, marked as
    /// checked out, and the cart is closed, in a single transaction.
    async fn checkout(&self, checkout: Checkout) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order with its lines.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// A customer's orders, newest first.
    async fn list_customer_orders(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order to `status` if the lifecycle allows it.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
