//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{AddToCart, NewCartLine},
            errors::CartsServiceError,
            records::{CartLineUuid, CartRecord, CartUuid},
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        products::repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts: PgCartsRepository,
    lines: PgCartLinesRepository,
    customers: PgCustomersRepository,
    products: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            lines: PgCartLinesRepository::new(),
            customers: PgCustomersRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: CartRecord,
    ) -> Result<CartRecord, CartsServiceError> {
        cart.lines = self.lines.get_lines(tx, cart.uuid).await?;

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .find_cart(&mut tx, cart)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = self.with_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn get_open_cart(&self, customer: CustomerUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.customers
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(CartsServiceError::CustomerNotFound)?;

        let cart = self
            .carts
            .find_open_cart(&mut tx, customer)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let cart = self.with_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.add_to_cart",
        skip(self, item),
        fields(
            customer_uuid = %item.customer_uuid,
            product_uuid = %item.product_uuid,
            quantity = item.quantity,
            cart_uuid = tracing::field::Empty,
            line_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn add_to_cart(&self, item: AddToCart) -> Result<CartRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        self.customers
            .find_customer(&mut tx, item.customer_uuid)
            .await?
            .ok_or(CartsServiceError::CustomerNotFound)?;

        let product = self
            .products
            .find_product(&mut tx, item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let total_price = product
            .price
            .checked_mul(u64::from(item.quantity))
            .ok_or(CartsServiceError::InvalidData)?;

        let cart = self
            .carts
            .upsert_open_cart(&mut tx, CartUuid::new(), item.customer_uuid)
            .await?;

        let span = Span::current();

        span.record("cart_uuid", tracing::field::display(cart.uuid));

        let line = self
            .lines
            .upsert_line(
                &mut tx,
                NewCartLine {
                    uuid: CartLineUuid::new(),
                    cart_uuid: cart.uuid,
                    product_uuid: product.uuid,
                    product_name: product.name,
                    product_image: product.image,
                    color: item.color,
                    size: item.size,
                    quantity: item.quantity,
                    unit_price: product.price,
                    total_price,
                },
            )
            .await?;

        span.record("line_uuid", tracing::field::display(line.uuid));

        let cart = self.carts.recalculate_total(&mut tx, cart.uuid).await?;
        let cart = self.with_lines(&mut tx, cart).await?;

        tx.commit().await?;

        info!(
            cart_uuid = %cart.uuid,
            line_uuid = %line.uuid,
            quantity = line.quantity,
            "added to cart"
        );

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_line",
        skip(self),
        fields(line_uuid = %line, cart_uuid = tracing::field::Empty),
        err
    )]
    async fn remove_line(&self, line: CartLineUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .lines
            .find_open_line(&mut tx, line)
            .await?
            .ok_or(CartsServiceError::LineNotFound)?;

        Span::current().record("cart_uuid", tracing::field::display(existing.cart_uuid));

        // Lock the cart first so removal and checkout take locks in the same order.
        self.carts
            .lock_cart(&mut tx, existing.cart_uuid)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self.lines.delete_open_line(&mut tx, line).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::LineNotFound);
        }

        let cart = self
            .carts
            .recalculate_total(&mut tx, existing.cart_uuid)
            .await?;

        let cart = self.with_lines(&mut tx, cart).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, line_uuid = %line, "removed cart line");

        Ok(cart)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a single cart with all of its lines.
    async fn get_cart(&self, cart: CartUuid) -> Result<CartRecord, CartsServiceError>;

    /// Retrieve the customer's open cart, if they have one.
    async fn get_open_cart(&self, customer: CustomerUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a product to the customer's open cart, opening one if needed.
    ///
    /// A line with the same product, color and size is merged: its quantity
    /// grows and it keeps the unit price captured when it was first added.
    async fn add_to_cart(&self, item: AddToCart) -> Result<CartRecord, CartsServiceError>;

    /// Remove a line that has not been checked out and return the repriced
    /// cart.
    async fn remove_line(&self, line: CartLineUuid) -> Result<CartRecord, CartsServiceError>;
}
