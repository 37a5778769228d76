//! Order Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{amount_to_sql, count_to_sql, try_get_amount, try_get_count},
    domain::{
        orders::{
            data::NewOrderLine,
            records::{OrderLineRecord, OrderLineUuid, OrderUuid},
        },
        products::records::ProductUuid,
    },
};

const CREATE_ORDER_LINES_SQL: &str = include_str!("../sql/create_order_lines.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("../sql/get_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderLinesRepository;

impl PgOrderLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts all lines of an order in one statement, returned by line number.
    #[tracing::instrument(
        name = "orders.repository.create_lines",
        skip(self, tx, lines),
        fields(order_uuid = %order, line_count = lines.len()),
        err
    )]
    pub(crate) async fn create_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: Vec<NewOrderLine>,
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let count = lines.len();

        let mut uuids: Vec<Uuid> = Vec::with_capacity(count);
        let mut line_numbers: Vec<i32> = Vec::with_capacity(count);
        let mut product_uuids: Vec<Uuid> = Vec::with_capacity(count);
        let mut product_names: Vec<String> = Vec::with_capacity(count);
        let mut product_images: Vec<Option<String>> = Vec::with_capacity(count);
        let mut colors: Vec<String> = Vec::with_capacity(count);
        let mut sizes: Vec<String> = Vec::with_capacity(count);
        let mut quantities: Vec<i32> = Vec::with_capacity(count);
        let mut unit_prices: Vec<i64> = Vec::with_capacity(count);
        let mut total_prices: Vec<i64> = Vec::with_capacity(count);

        for line in lines {
            uuids.push(line.uuid.into_uuid());
            line_numbers.push(count_to_sql(line.line_number)?);
            product_uuids.push(line.product_uuid.into_uuid());
            product_names.push(line.product_name);
            product_images.push(line.product_image);
            colors.push(line.color);
            sizes.push(line.size);
            quantities.push(count_to_sql(line.quantity)?);
            unit_prices.push(amount_to_sql(line.unit_price)?);
            total_prices.push(amount_to_sql(line.total_price)?);
        }

        let mut created = query_as::<Postgres, OrderLineRecord>(CREATE_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .bind(&uuids)
            .bind(&line_numbers)
            .bind(&product_uuids)
            .bind(&product_names)
            .bind(&product_images)
            .bind(&colors)
            .bind(&sizes)
            .bind(&quantities)
            .bind(&unit_prices)
            .bind(&total_prices)
            .fetch_all(&mut **tx)
            .await?;

        created.sort_by_key(|line| line.line_number);

        debug!(line_count = created.len(), "created order lines");

        Ok(created)
    }

    /// Lines of every listed order, grouped by order and sorted by line number.
    pub(crate) async fn get_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OrderLineRecord>(GET_ORDER_LINES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            line_number: try_get_count(row, "line_number")?,
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_image: row.try_get("product_image")?,
            color: row.try_get("color")?,
            size: row.try_get("size")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            total_price: try_get_amount(row, "total_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
