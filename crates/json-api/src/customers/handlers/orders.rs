//! Customer Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{self, get::OrdersEnvelope},
    state::State,
};

/// Customer Orders Handler
///
/// Returns the customer's orders, newest first.
#[endpoint(
    tags("customers", "orders"),
    summary = "List Customer Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders listed"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrdersEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let orders = state
        .app
        .orders
        .list_customer_orders(customer.into_inner().into())
        .await
        .map_err(orders::into_api_error)?;

    Ok(Json(OrdersEnvelope {
        message: "Orders retrieved successfully".to_string(),
        data: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        customers::records::CustomerUuid,
        orders::{OrdersServiceError, records::OrderUuid},
    };

    use crate::test_helpers::{Mocks, make_order, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(
            mocks,
            Router::with_path("customers/{customer}/orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_orders_keep_service_order() -> TestResult {
        let customer = CustomerUuid::new();
        let newest = OrderUuid::new();
        let oldest = OrderUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_customer_orders()
            .once()
            .withf(move |owner| *owner == customer)
            .return_once(move |_| {
                Ok(vec![
                    make_order(newest, customer, 1, 1_000),
                    make_order(oldest, customer, 2, 500),
                ])
            });

        let mut res = TestClient::get(format!("http://example.com/customers/{customer}/orders"))
            .send(&make_service(mocks))
            .await;

        let envelope: OrdersEnvelope = res.take_json().await?;
        let ids: Vec<_> = envelope.data.iter().map(|order| order.id).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(ids, vec![newest.into_uuid(), oldest.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_customer_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_customer_orders()
            .once()
            .return_once(|_| Err(OrdersServiceError::CustomerNotFound));

        let res = TestClient::get(format!(
            "http://example.com/customers/{}/orders",
            CustomerUuid::new()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
