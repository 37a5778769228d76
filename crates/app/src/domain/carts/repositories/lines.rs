//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_to_sql, count_to_sql, try_get_amount, try_get_count},
    domain::{
        carts::{
            data::NewCartLine,
            records::{CartLineRecord, CartLineUuid, CartUuid},
        },
        products::records::ProductUuid,
    },
};

const UPSERT_CART_LINE_SQL: &str = include_str!("../sql/upsert_cart_line.sql");
const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const GET_OPEN_CART_LINE_SQL: &str = include_str!("../sql/get_open_cart_line.sql");
const LOCK_OPEN_CART_LINES_SQL: &str = include_str!("../sql/lock_open_cart_lines.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("../sql/delete_cart_line.sql");
const CHECK_OUT_CART_LINES_SQL: &str = include_str!("../sql/check_out_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts the line, or merges it into the open line with the same
    /// product, color and size. A merge adds the quantities and reprices the
    /// line at its existing unit price.
    pub(crate) async fn upsert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: NewCartLine,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(UPSERT_CART_LINE_SQL)
            .bind(line.uuid.into_uuid())
            .bind(line.cart_uuid.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(line.product_name)
            .bind(line.product_image)
            .bind(line.color)
            .bind(line.size)
            .bind(count_to_sql(line.quantity)?)
            .bind(amount_to_sql(line.unit_price)?)
            .bind(amount_to_sql(line.total_price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_open_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_OPEN_CART_LINE_SQL)
            .bind(line.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lines not yet checked out, in insertion order, locked for the rest of
    /// the transaction.
    pub(crate) async fn lock_open_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(LOCK_OPEN_CART_LINES_SQL)
            .bind(cart.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_open_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(line.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn check_out_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[CartLineUuid],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = lines.iter().map(|line| line.into_uuid()).collect();

        let rows_affected = query(CHECK_OUT_CART_LINES_SQL)
            .bind(uuids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_image: row.try_get("product_image")?,
            color: row.try_get("color")?,
            size: row.try_get("size")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            total_price: try_get_amount(row, "total_price")?,
            checked_out: row.try_get("checked_out")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
