//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    carts::{get::CartEnvelope, into_api_error},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Remove Cart Line Handler
///
/// Deletes a line that has not been checked out and returns the repriced cart.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Line",
    responses(
        (status_code = StatusCode::OK, description = "Cart line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let line = line.into_inner();

    let cart = state
        .app
        .carts
        .remove_line(line.into())
        .await
        .map_err(into_api_error)?;

    info!(
        cart_uuid = %cart.uuid,
        line_uuid = %line,
        total_price = cart.total_price,
        "removed cart line"
    );

    Ok(Json(CartEnvelope {
        message: "Cart item removed successfully".to_string(),
        data: cart.into(),
    }))
}
