//! Get Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartLineRecord, CartRecord, CartStatus};

use crate::{carts::into_api_error, errors::ApiError, extensions::*, state::State};

/// Cart lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum CartStatusValue {
    Open,
    Closed,
}

impl From<CartStatus> for CartStatusValue {
    fn from(status: CartStatus) -> Self {
        match status {
            CartStatus::Open => Self::Open,
            CartStatus::Closed => Self::Closed,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub id: Uuid,

    /// The customer who owns the cart
    pub customer_id: Uuid,

    pub status: CartStatusValue,

    /// Sum of the line totals in minor units
    pub total_price: u64,

    /// The lines in the cart, in the order they were first added
    pub lines: Vec<CartLineResponse>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            id: cart.uuid.into(),
            customer_id: cart.customer_uuid.into(),
            status: cart.status.into(),
            total_price: cart.total_price,
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The unique identifier of the cart line
    pub id: Uuid,

    pub product_id: Uuid,

    /// Product name when the line was first added
    pub product_name: String,

    pub product_image: Option<String>,

    pub color: String,

    pub size: String,

    pub quantity: u32,

    /// Unit price captured when the line was first added
    pub unit_price: u64,

    pub total_price: u64,

    /// Whether the line has been copied into an order
    pub checked_out: bool,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            id: line.uuid.into(),
            product_id: line.product_uuid.into(),
            product_name: line.product_name,
            product_image: line.product_image,
            color: line.color,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
            checked_out: line.checked_out,
        }
    }
}

/// Cart Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    pub message: String,
    pub data: CartResponse,
}

/// Get Cart Handler
///
/// Returns a cart with all of its lines.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .get_cart(cart.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(CartEnvelope {
        message: "Cart retrieved successfully".to_string(),
        data: cart.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, records::CartUuid},
        customers::records::CustomerUuid,
    };

    use crate::{
        errors::ErrorBody,
        test_helpers::{Mocks, make_cart, make_cart_line, service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("carts/{cart}").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_returns_lines_and_total() -> TestResult {
        let uuid = CartUuid::new();
        let customer = CustomerUuid::new();
        let lines = vec![make_cart_line(uuid, 2, 2_000), make_cart_line(uuid, 1, 1_500)];

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .withf(move |cart| *cart == uuid)
            .return_once(move |_| Ok(make_cart(uuid, customer, lines)));

        let mut res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let body: CartEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.id, uuid.into_uuid());
        assert_eq!(body.data.customer_id, customer.into_uuid());
        assert_eq!(body.data.status, CartStatusValue::Open);
        assert_eq!(body.data.total_price, 5_500);
        assert_eq!(body.data.lines.len(), 2, "expected both lines");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_not_found_returns_404() -> TestResult {
        let uuid = CartUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_malformed_uuid_is_rejected() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_get_cart().never();

        let mut res = TestClient::get("http://example.com/carts/not-a-uuid")
            .send(&make_service(mocks))
            .await;

        let error: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(error.message, "parse http data failed");

        Ok(())
    }
}
