//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::orders::records::OrderStatus;

use crate::{
    errors::{ApiError, Field, Validator},
    extensions::*,
    orders::{get::OrderEnvelope, into_api_error},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of `pending`, `confirmed`, `shipped`, `delivered`, `cancelled`
    pub status: Field<String>,
}

impl UpdateOrderStatusRequest {
    fn parse(self) -> Result<OrderStatus, ApiError> {
        let mut validator = Validator::new();

        let raw = validator.take(self.status, "status");
        let raw = raw.trim();

        let status = OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == raw);

        validator
            .required(raw, "status")
            .check(
                raw.is_empty() || status.is_some(),
                "status",
                "The selected status is invalid.",
            )
            .finish()?;

        status.ok_or_else(|| ApiError::bad_request("Invalid order status"))
    }
}

/// Update Order Status Handler
///
/// Advances an order along `pending → confirmed → shipped → delivered`, or
/// cancels it before it ships.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    responses(
        (status_code = StatusCode::OK, description = "Order status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Illegal status transition"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = json.into_inner().parse()?;

    let order = state
        .app
        .orders
        .update_status(order.into_inner().into(), status)
        .await
        .map_err(into_api_error)?;

    info!(order_uuid = %order.uuid, status = %order.status, "order status updated");

    Ok(Json(OrderEnvelope {
        message: "Order status updated successfully".to_string(),
        data: order.into(),
    }))
}
