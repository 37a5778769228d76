//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::orders::data::Checkout;

use crate::{
    errors::{ApiError, Field, Validator},
    extensions::*,
    observability::record_order_placed,
    orders::{get::OrderEnvelope, into_api_error},
    state::State,
};

/// Checkout Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CheckoutRequest {
    pub cart_id: Field<Uuid>,
    pub customer_id: Field<Uuid>,

    /// Payment method label, e.g. `cod`
    pub payment_method: Field<String>,

    pub shipping_address: Field<String>,

    /// Discount in minor units
    pub discount: Field<u64>,
}

impl CheckoutRequest {
    fn into_checkout(self) -> Result<Checkout, ApiError> {
        let mut validator = Validator::new();

        let cart_id = validator.take(self.cart_id, "cart_id");
        let customer_id = validator.take(self.customer_id, "customer_id");
        let payment_method = validator.take(self.payment_method, "payment_method");
        let shipping_address = validator.take_optional(self.shipping_address, "shipping_address");
        let discount = validator.take_optional(self.discount, "discount");

        validator
            .required(&payment_method, "payment_method")
            .max_length(&payment_method, 50, "payment_method")
            .max_length(
                shipping_address.as_deref().unwrap_or_default(),
                500,
                "shipping_address",
            )
            .finish()?;

        Ok(Checkout {
            cart_uuid: cart_id.into(),
            customer_uuid: customer_id.into(),
            payment_method: payment_method.trim().to_string(),
            shipping_address: shipping_address
                .map(|address| address.trim().to_string())
                .filter(|address| !address.is_empty()),
            discount: discount.unwrap_or_default(),
        })
    }
}

/// Checkout Handler
///
/// Converts the customer's cart into a pending order. Every line not yet
/// checked out is copied into the order and the cart is closed, or nothing
/// changes at all.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid discount"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer or cart not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let checkout = json.into_inner().into_checkout()?;

    let order = state
        .app
        .orders
        .checkout(checkout)
        .await
        .map_err(into_api_error)?;

    record_order_placed();

    info!(
        order_uuid = %order.uuid,
        cart_uuid = %order.cart_uuid,
        line_count = order.lines.len(),
        total_price = order.total_price,
        "order placed"
    );

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderEnvelope {
        message: "Order created successfully".to_string(),
        data: order.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        database::SqlError,
        domain::{
            carts::records::CartUuid,
            customers::records::CustomerUuid,
            orders::{OrdersServiceError, records::OrderUuid},
        },
    };

    use crate::{
        errors::ErrorBody,
        orders::get::OrderStatusValue,
        test_helpers::{Mocks, make_order, service},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("orders").post(handler))
    }

    #[tokio::test]
    async fn test_checkout_success() -> TestResult {
        let cart = CartUuid::new();
        let customer = CustomerUuid::new();
        let order = OrderUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_checkout()
            .once()
            .withf(move |checkout| {
                *checkout
                    == Checkout {
                        cart_uuid: cart,
                        customer_uuid: customer,
                        payment_method: "cod".to_string(),
                        shipping_address: None,
                        discount: 0,
                    }
            })
            .return_once(move |_| Ok(make_order(order, customer, 2, 2_000)));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "cart_id": cart.into_uuid(),
                "customer_id": customer.into_uuid(),
                "payment_method": "cod",
            }))
            .send(&make_service(mocks))
            .await;

        let envelope: OrderEnvelope = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{order}").as_str()));
        assert_eq!(envelope.message, "Order created successfully");
        assert_eq!(envelope.data.status, OrderStatusValue::Pending);
        assert_eq!(envelope.data.total_price, 4_000);
        assert_eq!(envelope.data.lines.len(), 1, "expected one order line");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_forwards_address_and_discount() -> TestResult {
        let customer = CustomerUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_checkout()
            .once()
            .withf(|checkout| {
                checkout.shipping_address.as_deref() == Some("1 Main St")
                    && checkout.discount == 500
            })
            .return_once(move |_| Ok(make_order(OrderUuid::new(), customer, 1, 2_000)));

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "cart_id": CartUuid::new().into_uuid(),
                "customer_id": customer.into_uuid(),
                "payment_method": "card",
                "shipping_address": " 1 Main St ",
                "discount": 500,
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_checkout()
            .once()
            .return_once(|_| Err(OrdersServiceError::EmptyCart));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "cart_id": CartUuid::new().into_uuid(),
                "customer_id": CustomerUuid::new().into_uuid(),
                "payment_method": "cod",
            }))
            .send(&make_service(mocks))
            .await;

        let error: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(error.message, "No items in cart to checkout");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_unknown_cart_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_checkout()
            .once()
            .return_once(|_| Err(OrdersServiceError::CartNotFound));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "cart_id": CartUuid::new().into_uuid(),
                "customer_id": CustomerUuid::new().into_uuid(),
                "payment_method": "cod",
            }))
            .send(&make_service(mocks))
            .await;

        let error: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(error.message, "Cart not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_missing_payment_method_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_checkout().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "cart_id": CartUuid::new().into_uuid(),
                "customer_id": CustomerUuid::new().into_uuid(),
                "payment_method": "  ",
            }))
            .send(&make_service(mocks))
            .await;

        let error: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(
            error
                .errors
                .is_some_and(|errors| errors.contains_key("payment_method")),
            "payment_method should be reported"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_malformed_json_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_checkout().never();

        let mut res = TestClient::post("http://example.com/orders")
            .raw_json("{\"cart_id\": ")
            .send(&make_service(mocks))
            .await;

        let error: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!error.message.is_empty(), "expected an envelope message");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_missing_cart_id_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_checkout().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "customer_id": CustomerUuid::new().into_uuid(),
                "payment_method": "cod",
            }))
            .send(&make_service(mocks))
            .await;

        let error: ErrorBody = res.take_json().await?;
        let errors = error.errors.unwrap_or_default();

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(error.message, "The given data was invalid.");
        assert_eq!(
            errors.get("cart_id"),
            Some(&vec!["The cart_id field is required.".to_string()])
        );
        assert_eq!(errors.len(), 1, "only cart_id should fail");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_mistyped_fields_return_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_checkout().never();

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "cart_id": "not-a-uuid",
                "customer_id": CustomerUuid::new().into_uuid(),
                "payment_method": "cod",
                "discount": -5,
            }))
            .send(&make_service(mocks))
            .await;

        let error: ErrorBody = res.take_json().await?;
        let errors = error.errors.unwrap_or_default();

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(errors.contains_key("cart_id"), "cart_id should be reported");
        assert!(errors.contains_key("discount"), "discount should be reported");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_write_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_checkout().once().return_once(|_| {
            Err(OrdersServiceError::OrderCreationFailed(
                SqlError::PoolTimedOut,
            ))
        });

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "cart_id": CartUuid::new().into_uuid(),
                "customer_id": CustomerUuid::new().into_uuid(),
                "payment_method": "cod",
            }))
            .send(&make_service(mocks))
            .await;

        let error: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(error.message, "Internal Server Error");
        assert_eq!(error.error.as_deref(), Some("failed to create order"));

        Ok(())
    }
}
